use log::{debug, info, trace};

use crate::sim::{
    body::Body,
    error::SimulationError,
    initial_parameters::InitialParameters,
    trail::Trail,
    units::{difference, norm, Float, Vector, DIMENSIONALITY, SECONDS_PER_YEAR},
};

#[derive(Clone, Debug)]
pub(crate) struct StellarSystem {
    pub(crate) current_time: Float,
    pub(crate) step_count: u64,
    pub(crate) gravitational_constant: Float,
    pub(crate) bodies: Vec<Body>,
}

impl StellarSystem {
    pub(crate) fn new(params: &InitialParameters) -> Result<StellarSystem, SimulationError> {
        let mut bodies = Vec::with_capacity(params.bodies.len());
        for (index, body_params) in params.bodies.iter().enumerate() {
            let mut body = Body::new(
                index as u32,
                body_params.position,
                body_params.radius,
                body_params.color,
                body_params.mass,
            )?
            .with_velocity(body_params.velocity);
            if let Some(capacity) = params.trail_capacity {
                body = body.with_trail(Trail::capped(capacity));
            }
            if body_params.is_anchor {
                body.mark_as_anchor();
            }
            let name = body_params.name;
            let mass = body.mass;
            let [x, y] = body.position;
            let [vx, vy] = body.velocity;
            debug!(
                "{} (body {}): mass {:e} kg at ({:e}, {:e}) m, velocity ({:e}, {:e}) m/s",
                name, index, mass, x, y, vx, vy
            );
            bodies.push(body);
        }

        let system = Self::from_bodies(bodies, params.gravitational_constant);
        let bodies = system.bodies.len();
        let anchors = system.bodies.iter().filter(|body| body.is_anchor).count();
        info!("Created stellar system: {bodies} bodies, {anchors} anchors");
        Ok(system)
    }

    pub(crate) fn from_bodies(bodies: Vec<Body>, gravitational_constant: Float) -> StellarSystem {
        let mut system = StellarSystem {
            current_time: 0.,
            step_count: 0,
            gravitational_constant,
            bodies,
        };
        system.update_anchor_distances();
        system
    }

    /// Newtonian force that `by` exerts on `on`.
    ///
    /// The direction is the angle `atan2(dy, dx)` of the displacement from `on`
    /// to `by`, so the components are `F cos(theta)` and `F sin(theta)`.
    pub(crate) fn gravitational_force(
        on: &Body,
        by: &Body,
        gravitational_constant: Float,
    ) -> Result<Vector, SimulationError> {
        let [dx, dy] = difference(&on.position, &by.position);
        let distance = (dx * dx + dy * dy).sqrt();
        let force = gravitational_constant * on.mass * by.mass / (distance * distance);
        if distance == 0. || !force.is_finite() {
            return Err(SimulationError::DegenerateDistance {
                first: on.index,
                second: by.index,
            });
        }
        let theta = dy.atan2(dx);
        Ok([force * theta.cos(), force * theta.sin()])
    }

    /// Net force on every body, all read from the same pre-step positions.
    pub(crate) fn net_forces(&self) -> Result<Vec<Vector>, SimulationError> {
        let mut forces = vec![[0.; DIMENSIONALITY]; self.bodies.len()];
        for i in 0..self.bodies.len() {
            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let force = Self::gravitational_force(
                    &self.bodies[i],
                    &self.bodies[j],
                    self.gravitational_constant,
                )?;
                for k in 0..DIMENSIONALITY {
                    forces[i][k] += force[k];
                }
            }
        }
        Ok(forces)
    }

    /// Moves every body forward by `time_step` with semi-implicit Euler and
    /// records the new positions in their trails.
    ///
    /// Anchor distances are taken from the same pre-step positions as the
    /// forces. On error no body has been touched.
    pub(crate) fn advance(&mut self, time_step: Float) -> Result<(), SimulationError> {
        let forces = self.net_forces()?;
        self.update_anchor_distances();
        for (body, force) in self.bodies.iter_mut().zip(forces.iter()) {
            for k in 0..DIMENSIONALITY {
                body.velocity[k] += force[k] / body.mass * time_step;
            }
            for k in 0..DIMENSIONALITY {
                body.position[k] += body.velocity[k] * time_step;
            }
            body.trail.record(body.position);
        }

        let previous_year = (self.current_time / SECONDS_PER_YEAR).floor();
        self.current_time += time_step;
        self.step_count += 1;
        let steps = self.step_count;
        let time = self.current_time;
        trace!("Step {steps} reached t = {time:e} s");
        let years = (time / SECONDS_PER_YEAR).floor();
        if years > previous_year {
            let energy = self.total_energy();
            let angular_momentum = self.total_angular_momentum();
            info!(
                "Simulated {:.0} years in {} steps, energy {:e} J, angular momentum {:e} kg m^2/s",
                years, steps, energy, angular_momentum
            );
        }
        Ok(())
    }

    /// The first anchor in roster order is the reference for every body's
    /// displayed distance, including the other anchors.
    pub(crate) fn anchor(&self) -> Option<&Body> {
        self.bodies.iter().find(|body| body.is_anchor)
    }

    pub(crate) fn update_anchor_distances(&mut self) {
        let anchor_position = match self.anchor() {
            Some(anchor) => anchor.position,
            None => return,
        };
        for body in self.bodies.iter_mut() {
            body.distance_to_anchor = norm(&difference(&body.position, &anchor_position));
        }
    }

    pub(crate) fn total_energy(&self) -> Float {
        let g = self.gravitational_constant;
        let mut energy = 0.;
        for (i, body) in self.bodies.iter().enumerate() {
            energy += body.kinetic_energy();
            for other in self.bodies[(i + 1)..].iter() {
                energy += body.potential_energy_with(other, g);
            }
        }
        energy
    }

    pub(crate) fn total_angular_momentum(&self) -> Float {
        self.bodies.iter().map(|body| body.angular_momentum()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::units::{AU, G, TIME_STEP};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const SUN_MASS: Float = 1.98892e30;
    const EARTH_MASS: Float = 5.9742e24;

    fn body(index: u32, position: Vector, mass: Float) -> Body {
        Body::new(index, position, 1., (255, 255, 255), mass).unwrap()
    }

    fn sun_and_earth() -> StellarSystem {
        let mut sun = body(0, [0., 0.], SUN_MASS);
        sun.mark_as_anchor();
        let speed = (G * (SUN_MASS + EARTH_MASS) / AU).sqrt();
        let earth = body(1, [AU, 0.], EARTH_MASS).with_velocity([0., speed]);
        StellarSystem::from_bodies(vec![sun, earth], G)
    }

    #[test]
    fn forces_obey_newtons_third_law() {
        let body1 = body(1, [1.5, -2.], 2.5);
        let body2 = body(2, [-3., 4.5], 7.);

        let force_on_1 = StellarSystem::gravitational_force(&body1, &body2, 0.3).unwrap();
        let force_on_2 = StellarSystem::gravitational_force(&body2, &body1, 0.3).unwrap();
        println!("Force on body 1: {:?}", force_on_1);
        println!("Force on body 2: {:?}", force_on_2);

        assert_relative_eq!(force_on_1[0], -force_on_2[0], max_relative = 1e-12);
        assert_relative_eq!(force_on_1[1], -force_on_2[1], max_relative = 1e-12);
        assert!(force_on_1[0] < 0.);
        assert!(force_on_1[1] > 0.);
    }

    #[test]
    fn force_points_at_the_attracting_body_in_every_quadrant() {
        let origin = body(0, [0., 0.], 1.);
        for (x, y) in [(1., 1.), (-1., 1.), (-1., -1.), (1., -1.)] {
            let other = body(1, [x, y], 1.);
            let force = StellarSystem::gravitational_force(&origin, &other, 1.).unwrap();
            assert_eq!(force[0].signum(), x.signum());
            assert_eq!(force[1].signum(), y.signum());
            assert_relative_eq!(norm(&force), 0.5, max_relative = 1e-12);
        }
    }

    #[test]
    fn lone_anchor_stays_put() {
        let mut sun = body(0, [0., 0.], SUN_MASS);
        sun.mark_as_anchor();
        let mut system = StellarSystem::from_bodies(vec![sun], G);

        for _ in 0..1_000 {
            system.advance(TIME_STEP).unwrap();
        }

        assert_eq!(system.bodies[0].position, [0., 0.]);
        assert_eq!(system.bodies[0].velocity, [0., 0.]);
        assert_eq!(system.bodies[0].trail.len(), 1_000);
        assert_eq!(system.step_count, 1_000);
    }

    #[test]
    fn single_step_matches_semi_implicit_euler() {
        let heavy = body(0, [0., 0.], 10.);
        let light = body(1, [10., 0.], 5.);
        let mut system = StellarSystem::from_bodies(vec![heavy, light], 1.);

        let forces = system.net_forces().unwrap();
        assert_relative_eq!(forces[0][0], 0.5);
        assert_eq!(forces[0][1], 0.);
        assert_relative_eq!(forces[1][0], -0.5);

        system.advance(1.).unwrap();

        let heavy = &system.bodies[0];
        assert_relative_eq!(heavy.velocity[0], 0.05);
        assert_eq!(heavy.velocity[1], 0.);
        assert_relative_eq!(heavy.position[0], 0.05);
        assert_eq!(heavy.position[1], 0.);

        let light = &system.bodies[1];
        assert_relative_eq!(light.velocity[0], -0.1);
        assert_abs_diff_eq!(light.velocity[1], 0., epsilon = 1e-15);
        assert_relative_eq!(light.position[0], 9.9);
        assert_abs_diff_eq!(light.position[1], 0., epsilon = 1e-15);

        assert_eq!(
            heavy.trail.points().copied().collect::<Vec<_>>(),
            vec![heavy.position]
        );
        assert_eq!(system.current_time, 1.);
    }

    #[test]
    fn velocity_is_updated_before_position() {
        let heavy = body(0, [0., 0.], 10.);
        let light = body(1, [10., 0.], 5.).with_velocity([0., 2.]);
        let mut system = StellarSystem::from_bodies(vec![heavy, light], 1.);

        system.advance(2.).unwrap();

        let light = &system.bodies[1];
        // v = -0.1 * 2 along x, then x moves by v * 2
        assert_relative_eq!(light.velocity[0], -0.2);
        assert_relative_eq!(light.position[0], 9.6);
        assert_relative_eq!(light.position[1], 4.);
    }

    #[test]
    fn update_order_does_not_change_trajectories() {
        let bodies = vec![
            body(0, [0., 0.], 3.).with_velocity([0.1, 0.]),
            body(1, [4., 1.], 2.).with_velocity([0., 0.5]),
            body(2, [-2., 3.], 1.).with_velocity([-0.3, 0.]),
        ];
        let mut forward = StellarSystem::from_bodies(bodies.clone(), 1.);
        let mut backward = StellarSystem::from_bodies(bodies.into_iter().rev().collect(), 1.);

        for _ in 0..50 {
            forward.advance(0.01).unwrap();
            backward.advance(0.01).unwrap();
        }

        for body in forward.bodies.iter() {
            let twin = backward.bodies.iter().find(|other| *other == body).unwrap();
            for k in 0..DIMENSIONALITY {
                assert_relative_eq!(body.position[k], twin.position[k], max_relative = 1e-12);
                assert_relative_eq!(body.velocity[k], twin.velocity[k], max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn coincident_bodies_halt_without_corrupting_state() {
        let mut system = StellarSystem::from_bodies(
            vec![
                body(0, [1., 1.], 1.).with_velocity([1., 0.]),
                body(1, [1., 1.], 2.),
                body(2, [5., 5.], 3.),
            ],
            1.,
        );

        let result = system.advance(1.);

        assert_eq!(
            result,
            Err(SimulationError::DegenerateDistance {
                first: 0,
                second: 1
            })
        );
        assert_eq!(system.bodies[0].position, [1., 1.]);
        assert_eq!(system.bodies[0].velocity, [1., 0.]);
        assert_eq!(system.bodies[2].position, [5., 5.]);
        assert!(system.bodies.iter().all(|body| body.trail.is_empty()));
        assert_eq!(system.current_time, 0.);
        assert_eq!(system.step_count, 0);
    }

    #[test]
    fn circular_orbit_closes_after_one_period() {
        let mut system = sun_and_earth();
        let start = system.bodies[1].position;
        let mu = G * (SUN_MASS + EARTH_MASS);
        let period = 2. * std::f64::consts::PI * (AU * AU * AU / mu).sqrt();
        const STEPS: usize = 2_000;

        for _ in 0..STEPS {
            system.advance(period / STEPS as Float).unwrap();
        }

        let miss = norm(&difference(&start, &system.bodies[1].position));
        println!("Missed starting point by {} m", miss);
        assert!(miss < 1e-3 * AU);
        assert_relative_eq!(system.current_time, period, max_relative = 1e-9);
    }

    #[test]
    fn energy_and_angular_momentum_stay_bounded() {
        let mut system = sun_and_earth();
        let initial_energy = system.total_energy();
        let initial_angular_momentum = system.total_angular_momentum();

        let mut worst_energy_drift: Float = 0.;
        for _ in 0..(10. * SECONDS_PER_YEAR / TIME_STEP) as usize {
            system.advance(TIME_STEP).unwrap();
            let drift = ((system.total_energy() - initial_energy) / initial_energy).abs();
            worst_energy_drift = worst_energy_drift.max(drift);
            assert_relative_eq!(
                system.total_angular_momentum(),
                initial_angular_momentum,
                max_relative = 1e-9
            );
        }

        println!("Worst relative energy drift: {}", worst_energy_drift);
        assert!(worst_energy_drift < 1e-3);
    }

    #[test]
    fn default_solar_system_stays_bound_for_a_year() {
        let mut system = StellarSystem::new(&InitialParameters::default()).unwrap();
        let initial_distances: Vec<Float> = system
            .bodies
            .iter()
            .map(|body| body.distance_to_anchor)
            .collect();
        let initial_energy = system.total_energy();

        while system.current_time < SECONDS_PER_YEAR {
            system.advance(TIME_STEP).unwrap();
        }

        for (body, initial) in system.bodies.iter().zip(initial_distances.iter()).skip(1) {
            let ratio = body.distance_to_anchor / initial;
            let index = body.index;
            assert!(
                ratio > 0.9 && ratio < 1.1,
                "body {index} drifted to {ratio}"
            );
        }
        assert_relative_eq!(system.total_energy(), initial_energy, max_relative = 1e-4);
    }

    #[test]
    fn anchor_distances_use_first_anchor() {
        let mut first = body(0, [0., 0.], 1.);
        first.mark_as_anchor();
        let planet = body(1, [3., 4.], 1.);
        let mut second = body(2, [0., -2.], 1.);
        second.mark_as_anchor();

        let system = StellarSystem::from_bodies(vec![first, planet, second], 1.);

        assert_eq!(system.anchor().map(|anchor| anchor.index), Some(0));
        assert_relative_eq!(system.bodies[0].distance_to_anchor, 0.);
        assert_relative_eq!(system.bodies[1].distance_to_anchor, 5.);
        assert_relative_eq!(system.bodies[2].distance_to_anchor, 2.);
    }

    #[test]
    fn anchor_distances_follow_motion() {
        let mut system = sun_and_earth();
        assert_relative_eq!(system.bodies[1].distance_to_anchor, AU);

        system.advance(TIME_STEP).unwrap();
        assert_relative_eq!(system.bodies[1].distance_to_anchor, AU);

        let before_second_step = system.bodies[1].distance_to(&system.bodies[0]);
        system.advance(TIME_STEP).unwrap();
        assert_relative_eq!(system.bodies[1].distance_to_anchor, before_second_step);
    }

    #[test]
    fn anchor_distance_is_measured_before_the_move() {
        let mut anchor = body(0, [0., 0.], 10.);
        anchor.mark_as_anchor();
        let planet = body(1, [10., 0.], 5.);
        let mut system = StellarSystem::from_bodies(vec![anchor, planet], 1.);

        system.advance(1.).unwrap();

        assert_eq!(system.bodies[1].distance_to_anchor, 10.);
        assert_relative_eq!(
            system.bodies[1].distance_to(&system.bodies[0]),
            9.85,
            max_relative = 1e-12
        );

        system.advance(1.).unwrap();

        assert_relative_eq!(
            system.bodies[1].distance_to_anchor,
            9.85,
            max_relative = 1e-12
        );
    }

    #[test]
    fn without_anchor_distances_are_untouched() {
        let mut system = StellarSystem::from_bodies(
            vec![body(0, [0., 0.], 1.), body(1, [1., 0.], 1.)],
            1.,
        );
        system.advance(0.1).unwrap();
        assert!(system.anchor().is_none());
        assert!(system.bodies.iter().all(|b| b.distance_to_anchor == 0.));
    }

    #[test]
    fn new_system_follows_initial_parameters() {
        let params = InitialParameters {
            trail_capacity: Some(5),
            ..InitialParameters::default()
        };
        let mut system = StellarSystem::new(&params).unwrap();

        assert_eq!(system.bodies.len(), params.bodies.len());
        assert!(system.bodies[0].is_anchor);
        assert!(system.bodies[1..].iter().all(|body| !body.is_anchor));
        assert_eq!(system.bodies[3].velocity, params.bodies[3].velocity);
        assert_relative_eq!(system.bodies[3].distance_to_anchor, AU);

        for _ in 0..10 {
            system.advance(params.time_step).unwrap();
        }
        assert!(system.bodies.iter().all(|body| body.trail.len() == 5));
    }

    #[test]
    fn new_system_rejects_massless_body() {
        let mut params = InitialParameters::default();
        params.bodies[2].mass = 0.;

        match StellarSystem::new(&params) {
            Err(SimulationError::InvalidMass { index, mass }) => {
                assert_eq!(index, 2);
                assert_eq!(mass, 0.);
            }
            other => panic!("expected invalid mass, got {:?}", other.map(|_| ())),
        }
    }
}
