use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The scalar interface the dynamics models are written against.
///
/// Only field arithmetic, the two trig functions the closed-form
/// expressions need, and a finiteness check used during parameter
/// validation. Anything implementing these can instantiate a model.
pub trait SimValue:
    Add<Output = Self>
    + Copy
    + Div<Output = Self>
    + Finite
    + Mul<Output = Self>
    + Neg<Output = Self>
    + One
    + PartialOrd
    + Sub<Output = Self>
    + Trig
    + Zero
{
    /// Returns `self + self`
    fn double(self) -> Self {
        self + self
    }

    /// Returns `self * self`
    fn squared(self) -> Self {
        self * self
    }
}

impl<T> SimValue for T where
    T: Add<Output = Self>
        + Copy
        + Div<Output = Self>
        + Finite
        + Mul<Output = Self>
        + Neg<Output = Self>
        + One
        + PartialOrd
        + Sub<Output = Self>
        + Trig
        + Zero
{
}

/// Trait defining the trigonometric operations used by the models.
pub trait Trig {
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

impl Trig for f64 {
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }
}

impl Trig for f32 {
    fn sin(self) -> Self {
        f32::sin(self)
    }
    fn cos(self) -> Self {
        f32::cos(self)
    }
}

pub trait Finite {
    fn is_finite(&self) -> bool;
}

impl Finite for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Finite for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}
