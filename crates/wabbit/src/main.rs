use clap::{CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use wabbit_interp::{check, run, run_unchecked, tokenize, Outcome, Parser as WParser, Runtime};

#[derive(Parser, Debug)]
#[command(name = "wabbit", version)]
#[command(about = "Wabbit interpreter: type check and run .wb programs")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Source file to check and run (same as `wabbit run FILE`)
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type check a source file and run it if it is well typed
    Run {
        file: PathBuf,
        /// Run even if the type checker reports errors
        #[arg(long)]
        no_check: bool,
    },
    /// Parse and type-check a source file
    Check { file: PathBuf },
    /// Parse a source file and print the syntax tree
    Parse { file: PathBuf },
    /// Print the token stream of a source file
    Tokens { file: PathBuf },
}

fn read_source(file: &Path) -> Option<String> {
    if !file.exists() {
        eprintln!("{} does not exist.", file.display());
        return None;
    }
    match fs::read_to_string(file) {
        Ok(src) => Some(src),
        Err(_) => {
            eprintln!("File cannot be read.");
            None
        }
    }
}

// Diagnostics name the file, not the whole path it was given as.
fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = match (cli.command, cli.file) {
        (Some(command), _) => command,
        (None, Some(file)) => Command::Run { file, no_check: false },
        (None, None) => {
            eprintln!("Filename is required.");
            let _ = Cli::command().print_help();
            return ExitCode::FAILURE;
        }
    };
    match command {
        Command::Run { file, no_check } => {
            let Some(src) = read_source(&file) else { return ExitCode::FAILURE };
            let mut runtime = Runtime::stdout();
            if no_check {
                return match run_unchecked(&src, &mut runtime) {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("{}", e);
                        ExitCode::FAILURE
                    }
                };
            }
            match run(&display_name(&file), &src, &mut runtime) {
                Ok(Outcome::Executed) => ExitCode::SUCCESS,
                Ok(Outcome::Rejected(diagnostics)) => {
                    for d in diagnostics {
                        eprintln!("{}", d);
                    }
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Check { file } => {
            let Some(src) = read_source(&file) else { return ExitCode::FAILURE };
            match WParser::from_source(&src).parse_program() {
                Ok(prog) => {
                    let diagnostics = check(&prog, &display_name(&file), &src);
                    if diagnostics.is_empty() {
                        println!("Type check OK: {} statements", prog.body.len());
                        ExitCode::SUCCESS
                    } else {
                        for d in diagnostics {
                            eprintln!("{}", d);
                        }
                        ExitCode::FAILURE
                    }
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Parse { file } => {
            let Some(src) = read_source(&file) else { return ExitCode::FAILURE };
            match WParser::from_source(&src).parse_program() {
                Ok(prog) => {
                    println!("Parsed OK: {} statements", prog.body.len());
                    print!("{}", prog);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Tokens { file } => {
            let Some(src) = read_source(&file) else { return ExitCode::FAILURE };
            for (i, t) in tokenize(&src).iter().enumerate() {
                println!("{:03} {} {:?} at {}:{}", i, t.kind, t.lexeme, t.pos.line, t.pos.column);
            }
            ExitCode::SUCCESS
        }
    }
}
