use std::fmt;

/// Integer or real number token
#[derive(Debug, Clone, Copy)]
pub enum NumericToken {
    Integer(i64),
    Real(f64),
}

impl NumericToken {
    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericToken::Integer(i) => i as f64,
            NumericToken::Real(r) => r,
        }
    }

    /// Integer value, truncating reals toward zero
    pub fn as_i64(&self) -> i64 {
        match *self {
            NumericToken::Integer(i) => i,
            NumericToken::Real(r) => r as i64,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericToken::Integer(_))
    }
}

/// Exact comparison; a real matches an integer only when it is whole and
/// converts to that same `i64`
fn integer_equals_real(i: i64, r: f64) -> bool {
    // i64::MIN as f64 is exactly -2^63, the upper bound is exclusive
    let bound = -(i64::MIN as f64);
    r.fract() == 0.0 && r >= i64::MIN as f64 && r < bound && r as i64 == i
}

impl PartialEq for NumericToken {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (NumericToken::Integer(a), NumericToken::Integer(b)) => a == b,
            (NumericToken::Real(a), NumericToken::Real(b)) => a == b,
            (NumericToken::Integer(i), NumericToken::Real(r))
            | (NumericToken::Real(r), NumericToken::Integer(i)) => integer_equals_real(i, r),
        }
    }
}

impl From<i64> for NumericToken {
    fn from(i: i64) -> Self {
        NumericToken::Integer(i)
    }
}

impl From<i32> for NumericToken {
    fn from(i: i32) -> Self {
        NumericToken::Integer(i64::from(i))
    }
}

impl From<f64> for NumericToken {
    fn from(f: f64) -> Self {
        NumericToken::Real(f)
    }
}

impl fmt::Display for NumericToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericToken::Integer(i) => write!(f, "{i}"),
            NumericToken::Real(r) if r.fract() == 0.0 && r.is_finite() => write!(f, "{r:.1}"),
            NumericToken::Real(r) => write!(f, "{r}"),
        }
    }
}
