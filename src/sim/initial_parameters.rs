use super::body::BodyColor;
use super::units::{Float, Vector, AU, G, METERS_PER_KM, TIME_STEP};

const YELLOW: BodyColor = (255, 255, 0);
const WHITE: BodyColor = (255, 255, 255);
const BLUE: BodyColor = (0, 0, 255);
const RED: BodyColor = (188, 39, 50);
const DARK_GREY: BodyColor = (80, 78, 81);
const CRIMSON: BodyColor = (220, 20, 60);
const BROWN: BodyColor = (165, 42, 42);
const LIGHT_BLUE: BodyColor = (173, 216, 230);
const DARK_BLUE: BodyColor = (0, 0, 139);

#[derive(Clone, Debug)]
pub(crate) struct BodyParameters {
    pub(crate) name: &'static str,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) mass: Float,
    pub(crate) radius: Float,
    pub(crate) color: BodyColor,
    pub(crate) is_anchor: bool,
}

impl BodyParameters {
    /// A planet on the x axis, moving along y. A planet at positive x needs a
    /// negative speed to orbit in the same sense as one at negative x.
    fn planet(
        name: &'static str,
        distance_in_au: Float,
        speed_in_km_per_s: Float,
        mass: Float,
        radius: Float,
        color: BodyColor,
    ) -> BodyParameters {
        BodyParameters {
            name,
            position: [distance_in_au * AU, 0.],
            velocity: [0., speed_in_km_per_s * METERS_PER_KM],
            mass,
            radius,
            color,
            is_anchor: false,
        }
    }
}

pub(crate) struct InitialParameters {
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) pixels_per_au: Float,
    pub(crate) time_step: Float,
    pub(crate) gravitational_constant: Float,
    pub(crate) frames_per_second: u32,
    pub(crate) background_star_count: usize,
    /// Longest orbit trail kept per body, `None` keeps every point.
    pub(crate) trail_capacity: Option<usize>,
    pub(crate) bodies: Vec<BodyParameters>,
}

impl InitialParameters {
    /// Pixels per meter.
    pub(crate) fn scale(&self) -> Float {
        self.pixels_per_au / AU
    }
}

impl Default for InitialParameters {
    fn default() -> Self {
        let sun = BodyParameters {
            name: "Sun",
            position: [0., 0.],
            velocity: [0., 0.],
            mass: 1.98892e30,
            radius: 30.,
            color: YELLOW,
            is_anchor: true,
        };
        Self {
            window_width: 2100,
            window_height: 1100,
            pixels_per_au: 100.,
            time_step: TIME_STEP,
            gravitational_constant: G,
            frames_per_second: 60,
            background_star_count: 100,
            trail_capacity: None,
            bodies: vec![
                sun,
                BodyParameters::planet("Mercury", 0.387, -47.4, 3.30e23, 8., DARK_GREY),
                BodyParameters::planet("Venus", 0.723, -35.02, 4.8685e24, 14., WHITE),
                BodyParameters::planet("Earth", -1., 29.783, 5.9742e24, 16., BLUE),
                BodyParameters::planet("Mars", -1.524, 24.077, 6.39e23, 12., RED),
                BodyParameters::planet("Jupiter", 5.203, -13.1, 1.9e27, 25., CRIMSON),
                BodyParameters::planet("Saturn", 9.539, -9.7, 5.69e26, 23., BROWN),
                BodyParameters::planet("Uranus", 19.18, -6.8, 8.68e25, 18., LIGHT_BLUE),
                BodyParameters::planet("Neptune", 30.06, -5.4, 1.02e26, 20., DARK_BLUE),
            ],
        }
    }
}
