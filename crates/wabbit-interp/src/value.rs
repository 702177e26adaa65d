use std::fmt;

use crate::types::WabbitType;

/// The numeric payload of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i32),
    Float(f32),
}

impl Scalar {
    /// The type the payload actually has, independent of any tag.
    pub fn kind(self) -> WabbitType {
        match self {
            Scalar::Int(_) => WabbitType::Int,
            Scalar::Float(_) => WabbitType::Float,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

/// A tagged runtime value. Literals are tagged with their own type, operator
/// results are tagged `Any`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WabbitValue {
    pub ty: WabbitType,
    pub scalar: Scalar,
}

impl WabbitValue {
    pub fn int(n: i32) -> Self { Self { ty: WabbitType::Int, scalar: Scalar::Int(n) } }
    pub fn float(x: f32) -> Self { Self { ty: WabbitType::Float, scalar: Scalar::Float(x) } }
    pub fn any(scalar: Scalar) -> Self { Self { ty: WabbitType::Any, scalar } }
}

/// Renders a float the way Wabbit has always printed them: a fractional part is
/// always present, magnitudes outside `[1e-3, 1e7)` switch to `E` notation,
/// and the non-finite values read `Infinity`, `-Infinity` and `NaN`.
pub fn format_float(x: f32) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    let mag = x.abs();
    if mag == 0.0 || (1e-3..1e7).contains(&mag) {
        // Debug keeps the shortest round-trip digits and always shows ".0"
        return format!("{:?}", x);
    }
    let sci = format!("{:e}", x);
    match sci.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{}E{}", mantissa, exp),
        Some((mantissa, exp)) => format!("{}.0E{}", mantissa, exp),
        None => sci,
    }
}
