use std::fmt;

/// Static and runtime type tags.
///
/// `Any` only appears on runtime values produced by an operator, before
/// anything has re-tagged them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WabbitType {
    Int,
    Float,
    Any,
}

impl fmt::Display for WabbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WabbitType::Int => "INT",
            WabbitType::Float => "FLOAT",
            WabbitType::Any => "ANY",
        };
        f.write_str(name)
    }
}
