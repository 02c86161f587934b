use crate::sim::error::SimulationError;
use crate::sim::trail::{project, to_screen, Trail};
use crate::sim::units::{difference, norm, Float, Vector, DIMENSIONALITY};

/// Red, green and blue components used to draw a body.
pub(crate) type BodyColor = (u8, u8, u8);

#[derive(Clone, Debug)]
pub(crate) struct Body {
    pub(crate) index: u32,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) mass: Float,
    pub(crate) radius: Float,
    pub(crate) color: BodyColor,
    pub(crate) is_anchor: bool,
    pub(crate) distance_to_anchor: Float,
    pub(crate) trail: Trail,
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Body {
    pub(crate) fn new(
        index: u32,
        position: Vector,
        radius: Float,
        color: BodyColor,
        mass: Float,
    ) -> Result<Body, SimulationError> {
        if mass <= 0. || !mass.is_finite() {
            return Err(SimulationError::InvalidMass { index, mass });
        }
        Ok(Body {
            index,
            position,
            velocity: [0.; DIMENSIONALITY],
            mass,
            radius,
            color,
            is_anchor: false,
            distance_to_anchor: 0.,
            trail: Trail::unbounded(),
        })
    }

    pub(crate) fn with_velocity(mut self, velocity: Vector) -> Body {
        self.velocity = velocity;
        self
    }

    pub(crate) fn with_trail(mut self, trail: Trail) -> Body {
        self.trail = trail;
        self
    }

    /// Flags the body as the distance reference. Its motion is left alone.
    pub(crate) fn mark_as_anchor(&mut self) {
        self.is_anchor = true;
    }

    /// Screen position of the body and its orbit trail, both mapped through
    /// `physical * scale + offset`.
    pub(crate) fn drawable_state(
        &self,
        scale: Float,
        offset: Vector,
    ) -> (Vector, impl Iterator<Item = Vector> + Clone + '_) {
        (
            to_screen(&self.position, scale, offset),
            project(self.trail.points(), scale, offset),
        )
    }

    pub(crate) fn distance_to(&self, other: &Self) -> Float {
        norm(&difference(&self.position, &other.position))
    }

    pub(crate) fn kinetic_energy(&self) -> Float {
        let speed_squared = self.velocity.iter().map(|x| x * x).sum::<Float>();
        0.5 * self.mass * speed_squared
    }

    pub(crate) fn potential_energy_with(
        &self,
        other: &Self,
        gravitational_constant: Float,
    ) -> Float {
        -gravitational_constant * self.mass * other.mass / self.distance_to(other)
    }

    /// Out-of-plane component of the angular momentum about the origin.
    pub(crate) fn angular_momentum(&self) -> Float {
        assert!(DIMENSIONALITY == 2);
        self.mass * (self.position[0] * self.velocity[1] - self.position[1] * self.velocity[0])
    }
}
