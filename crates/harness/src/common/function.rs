//! Function kinds and wire-level operation selects.
//!
//! [`FunctionKind`] is the harness-side name of a verified operation; it
//! carries the metadata the generator and driver need (arity, phase
//! sequence, random-input domain). [`OpSelect`] is the select code a
//! multiplexed unit sees on its `sel` port, including the explicit
//! no-operation value used to insert idle cycles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operation select codes for multiplexed function units.
///
/// Single-function units ignore their select port; multiplexed units decode
/// it every cycle. `None` is a real wire value — the driver drives it during
/// bubble cycles between the phases of a two-phase function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpSelect {
    /// No operation: the idle select driven during bubble cycles.
    #[default]
    None,

    /// Addition.
    Add,

    /// Subtraction.
    Sub,

    /// Multiplication.
    Mul,

    /// Fused multiply-add.
    FusedMulAdd,

    /// Division.
    Div,

    /// Square root.
    Sqrt,

    /// Inverse square root.
    InvSqrt,

    /// Reciprocal.
    Reciprocal,

    /// Exponential.
    Exp,

    /// Natural logarithm.
    Log,

    /// Logistic sigmoid.
    Sigmoid,

    /// Softplus.
    SoftPlus,

    /// Sine.
    Sin,

    /// Cosine.
    Cos,

    /// First pass of arccosine: the square-root preparation step.
    AcosPhase1,

    /// Second pass of arccosine through the shared arctangent path.
    AcosPhase2,

    /// First pass of atan2: the reciprocal preparation step.
    Atan2Phase1,

    /// Second pass of atan2 through the shared arctangent path.
    Atan2Phase2,

    /// Scale-mixture Gaussian prior derivative.
    ScaleMixtureGaussian,
}

/// The closed set of verified function kinds.
///
/// Each kind knows its arity, the select sequence that computes it (one
/// select for single-phase kinds, two for the functions computed by two
/// sequential passes through a shared pipeline), and the interval random
/// test inputs are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Addition.
    Add,

    /// Subtraction.
    Sub,

    /// Multiplication.
    Mul,

    /// Fused multiply-add (`a * b + c`, single rounding).
    FusedMulAdd,

    /// Division.
    Div,

    /// Square root.
    Sqrt,

    /// Inverse square root.
    InvSqrt,

    /// Reciprocal.
    Reciprocal,

    /// Exponential.
    Exp,

    /// Natural logarithm.
    Log,

    /// Logistic sigmoid.
    Sigmoid,

    /// Softplus.
    SoftPlus,

    /// Sine.
    Sin,

    /// Cosine.
    Cos,

    /// Arccosine, computed in two passes through the shared pipeline.
    Acos,

    /// Two-argument arctangent (inputs ordered `[y, x]`), two passes.
    Atan2,

    /// Scale-mixture Gaussian prior derivative (σA/σB configured per campaign).
    ScaleMixtureGaussian,
}

impl FunctionKind {
    /// Every supported kind, in campaign order.
    pub const ALL: [FunctionKind; 17] = [
        FunctionKind::Add,
        FunctionKind::Sub,
        FunctionKind::Mul,
        FunctionKind::FusedMulAdd,
        FunctionKind::Div,
        FunctionKind::Sqrt,
        FunctionKind::InvSqrt,
        FunctionKind::Reciprocal,
        FunctionKind::Exp,
        FunctionKind::Log,
        FunctionKind::Sigmoid,
        FunctionKind::SoftPlus,
        FunctionKind::Sin,
        FunctionKind::Cos,
        FunctionKind::Acos,
        FunctionKind::Atan2,
        FunctionKind::ScaleMixtureGaussian,
    ];

    /// Number of input operands the unit consumes for this kind.
    pub const fn arity(self) -> usize {
        match self {
            FunctionKind::FusedMulAdd => 3,
            FunctionKind::Add
            | FunctionKind::Sub
            | FunctionKind::Mul
            | FunctionKind::Div
            | FunctionKind::Atan2 => 2,
            _ => 1,
        }
    }

    /// The select sequence computing this kind: one entry per pipeline pass.
    pub const fn phases(self) -> &'static [OpSelect] {
        match self {
            FunctionKind::Add => &[OpSelect::Add],
            FunctionKind::Sub => &[OpSelect::Sub],
            FunctionKind::Mul => &[OpSelect::Mul],
            FunctionKind::FusedMulAdd => &[OpSelect::FusedMulAdd],
            FunctionKind::Div => &[OpSelect::Div],
            FunctionKind::Sqrt => &[OpSelect::Sqrt],
            FunctionKind::InvSqrt => &[OpSelect::InvSqrt],
            FunctionKind::Reciprocal => &[OpSelect::Reciprocal],
            FunctionKind::Exp => &[OpSelect::Exp],
            FunctionKind::Log => &[OpSelect::Log],
            FunctionKind::Sigmoid => &[OpSelect::Sigmoid],
            FunctionKind::SoftPlus => &[OpSelect::SoftPlus],
            FunctionKind::Sin => &[OpSelect::Sin],
            FunctionKind::Cos => &[OpSelect::Cos],
            FunctionKind::Acos => &[OpSelect::AcosPhase1, OpSelect::AcosPhase2],
            FunctionKind::Atan2 => &[OpSelect::Atan2Phase1, OpSelect::Atan2Phase2],
            FunctionKind::ScaleMixtureGaussian => &[OpSelect::ScaleMixtureGaussian],
        }
    }

    /// Whether this kind is computed by two sequential pipeline passes.
    pub const fn is_two_phase(self) -> bool {
        self.phases().len() == 2
    }

    /// Whether this kind is an approximation (transcendental) rather than
    /// exact arithmetic; selects the epsilon class in the config table.
    pub const fn is_transcendental(self) -> bool {
        !matches!(
            self,
            FunctionKind::Add
                | FunctionKind::Sub
                | FunctionKind::Mul
                | FunctionKind::FusedMulAdd
                | FunctionKind::Div
                | FunctionKind::Sqrt
        )
    }

    /// Interval random test inputs are drawn from, per operand.
    ///
    /// Documented per kind: arithmetic spans ±10⁴, square root [0, 100],
    /// arccosine its closed domain [−1, 1], exponential/logarithm ±100.
    pub const fn domain(self) -> (f64, f64) {
        match self {
            FunctionKind::Add
            | FunctionKind::Sub
            | FunctionKind::Mul
            | FunctionKind::FusedMulAdd
            | FunctionKind::Div => (-1.0e4, 1.0e4),
            FunctionKind::Sqrt => (0.0, 100.0),
            FunctionKind::InvSqrt | FunctionKind::Reciprocal => (0.01, 100.0),
            FunctionKind::Exp | FunctionKind::Log => (-100.0, 100.0),
            FunctionKind::Sigmoid | FunctionKind::SoftPlus => (-30.0, 30.0),
            FunctionKind::Sin | FunctionKind::Cos => (-10.0, 10.0),
            FunctionKind::Acos => (-1.0, 1.0),
            FunctionKind::Atan2 => (-100.0, 100.0),
            FunctionKind::ScaleMixtureGaussian => (-10.0, 10.0),
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FunctionKind::Add => "add",
            FunctionKind::Sub => "sub",
            FunctionKind::Mul => "mul",
            FunctionKind::FusedMulAdd => "fma",
            FunctionKind::Div => "div",
            FunctionKind::Sqrt => "sqrt",
            FunctionKind::InvSqrt => "invsqrt",
            FunctionKind::Reciprocal => "reciprocal",
            FunctionKind::Exp => "exp",
            FunctionKind::Log => "log",
            FunctionKind::Sigmoid => "sigmoid",
            FunctionKind::SoftPlus => "softplus",
            FunctionKind::Sin => "sin",
            FunctionKind::Cos => "cos",
            FunctionKind::Acos => "acos",
            FunctionKind::Atan2 => "atan2",
            FunctionKind::ScaleMixtureGaussian => "smg",
        };
        write!(f, "{name}")
    }
}

impl FromStr for FunctionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(FunctionKind::Add),
            "sub" => Ok(FunctionKind::Sub),
            "mul" => Ok(FunctionKind::Mul),
            "fma" | "fused_mul_add" => Ok(FunctionKind::FusedMulAdd),
            "div" => Ok(FunctionKind::Div),
            "sqrt" => Ok(FunctionKind::Sqrt),
            "invsqrt" => Ok(FunctionKind::InvSqrt),
            "reciprocal" | "recip" => Ok(FunctionKind::Reciprocal),
            "exp" => Ok(FunctionKind::Exp),
            "log" => Ok(FunctionKind::Log),
            "sigmoid" => Ok(FunctionKind::Sigmoid),
            "softplus" => Ok(FunctionKind::SoftPlus),
            "sin" => Ok(FunctionKind::Sin),
            "cos" => Ok(FunctionKind::Cos),
            "acos" => Ok(FunctionKind::Acos),
            "atan2" => Ok(FunctionKind::Atan2),
            "smg" | "scale_mixture_gaussian" => Ok(FunctionKind::ScaleMixtureGaussian),
            other => Err(format!("unknown function kind: {other}")),
        }
    }
}
