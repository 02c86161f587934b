use std::fmt;

use super::units::Float;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SimulationError {
    /// A body was constructed with a mass that is not strictly positive.
    InvalidMass { index: u32, mass: Float },
    /// Two distinct bodies occupy the same position, so `1 / distance^2` is undefined.
    DegenerateDistance { first: u32, second: u32 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidMass { index, mass } => write!(
                f,
                "body {} has invalid mass {} kg, mass must be positive",
                index, mass
            ),
            SimulationError::DegenerateDistance { first, second } => write!(
                f,
                "bodies {} and {} share a position, gravitational force is undefined",
                first, second
            ),
        }
    }
}

impl std::error::Error for SimulationError {}
