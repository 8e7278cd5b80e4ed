//! The allow-listed constants and functions.
//!
//! Nothing outside these tables (and the declared variables) can be named in
//! an expression. A declared variable shadows a constant or function of the
//! same name.

use std::f64::consts;

use super::special;

/// Named constants.
const CONSTANTS: &[(&str, f64)] = &[
    ("pi", consts::PI),
    ("e", consts::E),
    ("tau", consts::TAU),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

/// Value of an allow-listed constant.
pub(crate) fn constant(name: &str) -> Option<f64> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
}

/// Allow-listed math function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Expm1,
    Log,
    Log2,
    Log10,
    Log1p,
    Sqrt,
    Fabs,
    Floor,
    Ceil,
    Trunc,
    Pow,
    Hypot,
    Degrees,
    Radians,
    Copysign,
    Fmod,
    Cbrt,
    Exp2,
    Erf,
    Erfc,
    Gamma,
    Lgamma,
    Factorial,
}

const FUNCTIONS: &[(&str, Builtin)] = &[
    ("sin", Builtin::Sin),
    ("cos", Builtin::Cos),
    ("tan", Builtin::Tan),
    ("asin", Builtin::Asin),
    ("acos", Builtin::Acos),
    ("atan", Builtin::Atan),
    ("atan2", Builtin::Atan2),
    ("sinh", Builtin::Sinh),
    ("cosh", Builtin::Cosh),
    ("tanh", Builtin::Tanh),
    ("asinh", Builtin::Asinh),
    ("acosh", Builtin::Acosh),
    ("atanh", Builtin::Atanh),
    ("exp", Builtin::Exp),
    ("expm1", Builtin::Expm1),
    ("log", Builtin::Log),
    ("log2", Builtin::Log2),
    ("log10", Builtin::Log10),
    ("log1p", Builtin::Log1p),
    ("sqrt", Builtin::Sqrt),
    ("fabs", Builtin::Fabs),
    ("floor", Builtin::Floor),
    ("ceil", Builtin::Ceil),
    ("trunc", Builtin::Trunc),
    ("pow", Builtin::Pow),
    ("hypot", Builtin::Hypot),
    ("degrees", Builtin::Degrees),
    ("radians", Builtin::Radians),
    ("copysign", Builtin::Copysign),
    ("fmod", Builtin::Fmod),
    ("cbrt", Builtin::Cbrt),
    ("exp2", Builtin::Exp2),
    ("erf", Builtin::Erf),
    ("erfc", Builtin::Erfc),
    ("gamma", Builtin::Gamma),
    ("lgamma", Builtin::Lgamma),
    ("factorial", Builtin::Factorial),
];

impl Builtin {
    /// Function for an allow-listed name.
    pub fn lookup(name: &str) -> Option<Self> {
        FUNCTIONS.iter().find(|(n, _)| *n == name).map(|&(_, b)| b)
    }

    /// Source name.
    pub fn name(&self) -> &'static str {
        FUNCTIONS
            .iter()
            .find(|(_, b)| b == self)
            .map_or("?", |&(n, _)| n)
    }

    /// Smallest and largest accepted argument count.
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Builtin::Log => (1, 2),
            Builtin::Atan2 | Builtin::Pow | Builtin::Hypot | Builtin::Copysign | Builtin::Fmod => (2, 2),
            _ => (1, 1),
        }
    }

    /// Accepted argument counts, for error messages.
    pub fn arity_text(&self) -> &'static str {
        match self.arity() {
            (1, 1) => "1",
            (2, 2) => "2",
            _ => "1 or 2",
        }
    }

    /// Whether `count` arguments are accepted.
    pub fn accepts(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        (min..=max).contains(&count)
    }

    /// Apply to already-checked arguments.
    pub fn apply(&self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Builtin::Sin => x.sin(),
            Builtin::Cos => x.cos(),
            Builtin::Tan => x.tan(),
            Builtin::Asin => x.asin(),
            Builtin::Acos => x.acos(),
            Builtin::Atan => x.atan(),
            Builtin::Atan2 => x.atan2(y),
            Builtin::Sinh => x.sinh(),
            Builtin::Cosh => x.cosh(),
            Builtin::Tanh => x.tanh(),
            Builtin::Asinh => x.asinh(),
            Builtin::Acosh => x.acosh(),
            Builtin::Atanh => x.atanh(),
            Builtin::Exp => x.exp(),
            Builtin::Expm1 => x.exp_m1(),
            Builtin::Log if args.len() == 2 => x.ln() / y.ln(),
            Builtin::Log => x.ln(),
            Builtin::Log2 => x.log2(),
            Builtin::Log10 => x.log10(),
            Builtin::Log1p => x.ln_1p(),
            Builtin::Sqrt => x.sqrt(),
            Builtin::Fabs => x.abs(),
            Builtin::Floor => x.floor(),
            Builtin::Ceil => x.ceil(),
            Builtin::Trunc => x.trunc(),
            Builtin::Pow => x.powf(y),
            Builtin::Hypot => x.hypot(y),
            Builtin::Degrees => x.to_degrees(),
            Builtin::Radians => x.to_radians(),
            Builtin::Copysign => x.copysign(y),
            Builtin::Fmod => x % y,
            Builtin::Cbrt => x.cbrt(),
            Builtin::Exp2 => x.exp2(),
            Builtin::Erf => special::erf(x),
            Builtin::Erfc => special::erfc(x),
            Builtin::Gamma => special::gamma(x),
            Builtin::Lgamma => special::lgamma(x),
            Builtin::Factorial => special::factorial(x),
        }
    }
}
