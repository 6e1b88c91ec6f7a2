//! Forward-mode differentiation of scalar functions, using dual numbers.
//!
//! Functions written generically over [`Real`] can be evaluated either with
//! `f64` to get their value, or with [`Dual`] to get their value and their
//! exact derivative from the very same expression.
use std::ops::{Add, Sub, Mul, Div, Neg};

use num_traits::{Zero, One};

/// Scalar types usable to evaluate a differentiable expression
pub trait Real: Copy + Zero + One + From<f64>
    + Add<Output = Self> + Sub<Output = Self>
    + Mul<Output = Self> + Div<Output = Self>
    + Neg<Output = Self> {}

impl Real for f64 {}

/// A dual number `value + derivative ε`, with `ε² = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// value of the expression
    pub value: f64,
    /// derivative of the expression with respect to the seeded variable
    pub derivative: f64,
}

impl Dual {
    /// Create a dual number for the variable of differentiation, with value
    /// `value` and a derivative of 1.
    pub fn variable(value: f64) -> Dual {
        Dual { value, derivative: 1.0 }
    }

    /// Create a dual number for a constant, with a derivative of 0
    pub fn constant(value: f64) -> Dual {
        Dual { value, derivative: 0.0 }
    }

    /// Evaluate `function` at `x`, returning both its value and its
    /// derivative
    pub fn evaluate(function: impl Fn(Dual) -> Dual, x: f64) -> (f64, f64) {
        let result = function(Dual::variable(x));
        return (result.value, result.derivative);
    }
}

impl Real for Dual {}

impl From<f64> for Dual {
    fn from(value: f64) -> Dual {
        Dual::constant(value)
    }
}

impl Add for Dual {
    type Output = Dual;
    #[inline]
    fn add(self, other: Dual) -> Dual {
        Dual {
            value: self.value + other.value,
            derivative: self.derivative + other.derivative,
        }
    }
}

impl Sub for Dual {
    type Output = Dual;
    #[inline]
    fn sub(self, other: Dual) -> Dual {
        Dual {
            value: self.value - other.value,
            derivative: self.derivative - other.derivative,
        }
    }
}

impl Mul for Dual {
    type Output = Dual;
    #[inline]
    fn mul(self, other: Dual) -> Dual {
        Dual {
            value: self.value * other.value,
            derivative: self.derivative * other.value + self.value * other.derivative,
        }
    }
}

impl Div for Dual {
    type Output = Dual;
    #[inline]
    fn div(self, other: Dual) -> Dual {
        Dual {
            value: self.value / other.value,
            derivative: (self.derivative * other.value - self.value * other.derivative) / (other.value * other.value),
        }
    }
}

impl Neg for Dual {
    type Output = Dual;
    #[inline]
    fn neg(self) -> Dual {
        Dual {
            value: -self.value,
            derivative: -self.derivative,
        }
    }
}

impl Zero for Dual {
    fn zero() -> Dual {
        Dual::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0.0 && self.derivative == 0.0
    }
}

impl One for Dual {
    fn one() -> Dual {
        Dual::constant(1.0)
    }
}
