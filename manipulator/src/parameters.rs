use serde::{Deserialize, Serialize};
use sim_value::SimValue;
use std::fmt;
use thiserror::Error;

/// Names the physical parameter that failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    M1,
    L1,
    Lc1,
    M2,
    L2,
    Lc2,
    G,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::M1 => "m1",
            Parameter::L1 => "l1",
            Parameter::Lc1 => "lc1",
            Parameter::M2 => "m2",
            Parameter::L2 => "l2",
            Parameter::Lc2 => "lc2",
            Parameter::G => "g",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidParameterError {
    #[error("parameter {0} must be finite")]
    NotFinite(Parameter),
    #[error("parameter {0} cannot be less than or equal to zero")]
    NotPositive(Parameter),
}

impl InvalidParameterError {
    pub fn parameter(&self) -> Parameter {
        match self {
            InvalidParameterError::NotFinite(p) | InvalidParameterError::NotPositive(p) => *p,
        }
    }
}

/// Which link of the arm a record belongs to. `First` is the link driven
/// by the base (shoulder) joint, `Second` by the elbow joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkIndex {
    First,
    Second,
}

impl LinkIndex {
    fn parameters(self) -> (Parameter, Parameter, Parameter) {
        match self {
            LinkIndex::First => (Parameter::M1, Parameter::L1, Parameter::Lc1),
            LinkIndex::Second => (Parameter::M2, Parameter::L2, Parameter::Lc2),
        }
    }
}

/// Mass, length and joint-to-center-of-mass distance of one link.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkParameters<T = f64> {
    pub mass: T,
    pub length: T,
    pub center_of_mass: T,
}

impl<T> LinkParameters<T>
where
    T: SimValue,
{
    pub fn new(mass: T, length: T, center_of_mass: T) -> Self {
        Self {
            mass,
            length,
            center_of_mass,
        }
    }

    /// Mass and length must be finite and positive, the center of mass
    /// offset only finite.
    pub fn validate(&self, index: LinkIndex) -> Result<(), InvalidParameterError> {
        let (mass, length, center_of_mass) = index.parameters();
        positive(self.mass, mass)?;
        positive(self.length, length)?;
        finite(self.center_of_mass, center_of_mass)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParameters<T = f64> {
    /// gravitational acceleration magnitude, acting along -y
    pub gravity: T,
}

impl EnvironmentParameters<f64> {
    pub const EARTH: Self = Self { gravity: 9.81 };
}

impl Default for EnvironmentParameters<f64> {
    fn default() -> Self {
        Self::EARTH
    }
}

impl<T> EnvironmentParameters<T>
where
    T: SimValue,
{
    pub fn new(gravity: T) -> Self {
        Self { gravity }
    }

    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        finite(self.gravity, Parameter::G)
    }
}

fn finite<T: SimValue>(value: T, parameter: Parameter) -> Result<(), InvalidParameterError> {
    if !value.is_finite() {
        return Err(InvalidParameterError::NotFinite(parameter));
    }
    Ok(())
}

fn positive<T: SimValue>(value: T, parameter: Parameter) -> Result<(), InvalidParameterError> {
    finite(value, parameter)?;
    if value <= T::zero() {
        return Err(InvalidParameterError::NotPositive(parameter));
    }
    Ok(())
}
