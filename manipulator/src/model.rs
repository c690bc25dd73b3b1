use crate::{
    christoffel::ChristoffelSymbols,
    joint_space::{JointConfiguration, JointVelocity, TorqueVector},
    parameters::{EnvironmentParameters, InvalidParameterError, LinkIndex, LinkParameters},
};
use sim_value::SimValue;
use std::fmt::Debug;

/// Closed-form Euler-Lagrange dynamics of a planar arm with two revolute
/// joints moving in a vertical plane.
///
/// Angles are measured from the +x axis, gravity acts along -y. The model
/// is immutable after construction; every operation is a pure function of
/// its arguments, so a single instance can be shared between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoLinkDynamicsModel<T = f64> {
    link1: LinkParameters<T>,
    link2: LinkParameters<T>,
    environment: EnvironmentParameters<T>,
}

impl<T> TwoLinkDynamicsModel<T>
where
    T: SimValue + Debug,
{
    pub fn new(
        link1: LinkParameters<T>,
        link2: LinkParameters<T>,
        environment: EnvironmentParameters<T>,
    ) -> Result<Self, InvalidParameterError> {
        let validation = link1
            .validate(LinkIndex::First)
            .and_then(|_| link2.validate(LinkIndex::Second))
            .and_then(|_| environment.validate());
        if let Err(e) = validation {
            tracing::warn!(?link1, ?link2, ?environment, "rejected two-link parameters: {e}");
            return Err(e);
        }
        tracing::debug!(?link1, ?link2, ?environment, "two-link dynamics model constructed");
        Ok(Self {
            link1,
            link2,
            environment,
        })
    }

    pub fn from_parameters(
        m1: T,
        l1: T,
        lc1: T,
        m2: T,
        l2: T,
        lc2: T,
        g: T,
    ) -> Result<Self, InvalidParameterError> {
        Self::new(
            LinkParameters::new(m1, l1, lc1),
            LinkParameters::new(m2, l2, lc2),
            EnvironmentParameters::new(g),
        )
    }
}

impl<T> TwoLinkDynamicsModel<T>
where
    T: SimValue,
{
    pub fn link1(&self) -> &LinkParameters<T> {
        &self.link1
    }

    pub fn link2(&self) -> &LinkParameters<T> {
        &self.link2
    }

    pub fn environment(&self) -> &EnvironmentParameters<T> {
        &self.environment
    }

    /// Static joint torques holding the arm at `q` against gravity.
    ///
    /// ```text
    /// tau0 = (m1*lc1 + m2*l1) * g * cos(q0) + m2*lc2*g*cos(q0+q1)
    /// tau1 = m2*lc2*g*cos(q0+q1)
    /// ```
    pub fn gravity_load(&self, q: &JointConfiguration<T>) -> TorqueVector<T> {
        let LinkParameters {
            mass: m1,
            length: l1,
            center_of_mass: lc1,
        } = self.link1;
        let LinkParameters {
            mass: m2,
            center_of_mass: lc2,
            ..
        } = self.link2;
        let g = self.environment.gravity;

        let elbow = m2 * lc2 * g * (q.q0 + q.q1).cos();
        let shoulder = (m1 * lc1 + m2 * l1) * g * q.q0.cos() + elbow;
        TorqueVector::new(shoulder, elbow)
    }

    pub fn christoffel(&self, q: &JointConfiguration<T>) -> ChristoffelSymbols<T> {
        let h = -(self.link2.mass * self.link1.length * self.link2.center_of_mass * q.q1.sin());
        ChristoffelSymbols::new(h)
    }

    /// Coriolis and centrifugal torques, gravity and joint accelerations
    /// held at zero.
    ///
    /// ```text
    /// tau0 = 2*h*qd0*qd1 + h*qd1^2
    /// tau1 = -h*qd0^2
    /// ```
    pub fn velocity_coupling(
        &self,
        q: &JointConfiguration<T>,
        qd: &JointVelocity<T>,
    ) -> TorqueVector<T> {
        self.christoffel(q).quadratic_form(qd)
    }

    /// Inverse dynamics at zero joint acceleration: gravity load plus
    /// velocity coupling. The inertial `M(q) * qdd` term is not modeled.
    pub fn bias_torque(&self, q: &JointConfiguration<T>, qd: &JointVelocity<T>) -> TorqueVector<T> {
        self.gravity_load(q) + self.velocity_coupling(q, qd)
    }

    /// Gravitational potential energy relative to the base joint height.
    /// [`Self::gravity_load`] is its gradient with respect to `q`.
    pub fn potential_energy(&self, q: &JointConfiguration<T>) -> T {
        let LinkParameters {
            mass: m1,
            length: l1,
            center_of_mass: lc1,
        } = self.link1;
        let LinkParameters {
            mass: m2,
            center_of_mass: lc2,
            ..
        } = self.link2;
        let g = self.environment.gravity;

        let y1 = lc1 * q.q0.sin();
        let y2 = l1 * q.q0.sin() + lc2 * (q.q0 + q.q1).sin();
        m1 * g * y1 + m2 * g * y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Parameter;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::SmallRng};
    use std::f64::consts::{FRAC_PI_2, PI, TAU};
    use utilities::{assert_close, assert_pair_close};

    const TOL: f64 = 1e-9;

    fn canonical() -> TwoLinkDynamicsModel {
        TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, 1.0, 1.0, 0.5, 9.81).unwrap()
    }

    fn random_configuration(rng: &mut SmallRng) -> JointConfiguration {
        JointConfiguration::new(rng.random_range(-PI..PI), rng.random_range(-PI..PI))
    }

    fn random_velocity(rng: &mut SmallRng) -> JointVelocity {
        JointVelocity::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0))
    }

    #[test]
    fn test_gravity_load_canonical() {
        let model = canonical();
        let cases = [
            ((0.0, 0.0), (19.62, 4.905)),
            ((0.0, FRAC_PI_2), (14.715, 0.0)),
            ((FRAC_PI_2, 0.0), (0.0, 0.0)),
            ((FRAC_PI_2, -FRAC_PI_2), (4.905, 4.905)),
        ];
        for (q, expected) in cases {
            let tau = model.gravity_load(&q.into());
            assert_pair_close(tau.into(), expected, TOL);
        }
    }

    #[test]
    fn test_velocity_coupling_canonical() {
        let model = canonical();
        let qd = JointVelocity::new(1.0, 1.0);
        let cases = [
            ((0.0, 0.0), (0.0, 0.0)),
            ((0.0, FRAC_PI_2), (-1.5, 0.5)),
            ((FRAC_PI_2, 0.0), (0.0, 0.0)),
            ((FRAC_PI_2, -FRAC_PI_2), (1.5, -0.5)),
        ];
        for (q, expected) in cases {
            let tau = model.velocity_coupling(&q.into(), &qd);
            assert_pair_close(tau.into(), expected, TOL);
        }
    }

    #[test]
    fn test_velocity_coupling_matches_expanded_form() {
        let model = TwoLinkDynamicsModel::from_parameters(2.0, 1.5, 0.7, 0.8, 1.2, 0.4, 9.81)
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let q = random_configuration(&mut rng);
            let qd = random_velocity(&mut rng);
            let h = -0.8 * 1.5 * 0.4 * q.q1.sin();
            let tau = model.velocity_coupling(&q, &qd);
            assert_close(tau.tau0, 2.0 * h * qd.qd0 * qd.qd1 + h * qd.qd1 * qd.qd1, TOL);
            assert_close(tau.tau1, -h * qd.qd0 * qd.qd0, TOL);
        }
    }

    #[test]
    fn test_gravity_load_periodic() {
        let model = canonical();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let q = random_configuration(&mut rng);
            let tau = model.gravity_load(&q);
            let shifted0 = model.gravity_load(&JointConfiguration::new(q.q0 + TAU, q.q1));
            let shifted1 = model.gravity_load(&JointConfiguration::new(q.q0, q.q1 + TAU));
            assert_pair_close(tau.into(), shifted0.into(), TOL);
            assert_pair_close(tau.into(), shifted1.into(), TOL);
        }
    }

    #[test]
    fn test_zero_velocity_no_coupling() {
        let model = canonical();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let q = random_configuration(&mut rng);
            let tau = model.velocity_coupling(&q, &JointVelocity::zeros());
            assert_eq!(tau, TorqueVector::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_decoupled_when_elbow_straight() {
        let model = canonical();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let q0 = rng.random_range(-PI..PI);
            let qd = random_velocity(&mut rng);
            let tau = model.velocity_coupling(&JointConfiguration::new(q0, 0.0), &qd);
            assert_eq!(tau, TorqueVector::new(0.0, 0.0));
            // sin(pi) is only zero to within rounding
            let tau = model.velocity_coupling(&JointConfiguration::new(q0, PI), &qd);
            assert_pair_close(tau.into(), (0.0, 0.0), TOL);
        }
    }

    #[test]
    fn test_gravity_load_linear_in_g() {
        let model = canonical();
        let doubled =
            TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, 1.0, 1.0, 0.5, 19.62).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let q = random_configuration(&mut rng);
            let tau = model.gravity_load(&q);
            let tau2 = doubled.gravity_load(&q);
            assert_abs_diff_eq!(tau2.tau0, 2.0 * tau.tau0, epsilon = TOL);
            assert_abs_diff_eq!(tau2.tau1, 2.0 * tau.tau1, epsilon = TOL);
        }
    }

    #[test]
    fn test_gravity_load_is_potential_gradient() {
        let model = TwoLinkDynamicsModel::from_parameters(2.0, 1.5, 0.7, 0.8, 1.2, 0.4, 9.81)
            .unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let eps = 1e-6;
        for _ in 0..20 {
            let q = random_configuration(&mut rng);
            let tau = model.gravity_load(&q);
            let dv0 = (model.potential_energy(&JointConfiguration::new(q.q0 + eps, q.q1))
                - model.potential_energy(&JointConfiguration::new(q.q0 - eps, q.q1)))
                / (2.0 * eps);
            let dv1 = (model.potential_energy(&JointConfiguration::new(q.q0, q.q1 + eps))
                - model.potential_energy(&JointConfiguration::new(q.q0, q.q1 - eps)))
                / (2.0 * eps);
            assert_close(tau.tau0, dv0, 1e-6);
            assert_close(tau.tau1, dv1, 1e-6);
        }
    }

    #[test]
    fn test_bias_torque() {
        let model = canonical();
        let q = JointConfiguration::new(0.0, FRAC_PI_2);
        let tau = model.bias_torque(&q, &JointVelocity::new(1.0, 1.0));
        assert_pair_close(tau.into(), (14.715 - 1.5, 0.5), TOL);
    }

    #[test]
    fn test_f32_instantiation() {
        let model: TwoLinkDynamicsModel<f32> =
            TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, 1.0, 1.0, 0.5, 9.81).unwrap();
        let tau = model.gravity_load(&JointConfiguration::new(0.0, 0.0));
        assert!((tau.tau0 - 19.62).abs() < 1e-4);
        assert!((tau.tau1 - 4.905).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_parameters() {
        let e = TwoLinkDynamicsModel::from_parameters(0.0, 1.0, 0.5, 1.0, 1.0, 0.5, 9.81)
            .unwrap_err();
        assert_eq!(e, InvalidParameterError::NotPositive(Parameter::M1));

        let e = TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, 1.0, -1.0, 0.5, 9.81)
            .unwrap_err();
        assert_eq!(e, InvalidParameterError::NotPositive(Parameter::L2));

        let e = TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, 1.0, 1.0, 0.5, f64::NAN)
            .unwrap_err();
        assert_eq!(e, InvalidParameterError::NotFinite(Parameter::G));

        let e = TwoLinkDynamicsModel::from_parameters(1.0, 1.0, 0.5, f64::INFINITY, 1.0, 0.5, 9.81)
            .unwrap_err();
        assert_eq!(e, InvalidParameterError::NotFinite(Parameter::M2));
    }

    #[test]
    fn test_valid_parameters_accessible() {
        let model = canonical();
        assert_eq!(model.link1(), &LinkParameters::new(1.0, 1.0, 0.5));
        assert_eq!(model.link2().center_of_mass, 0.5);
        assert_eq!(model.environment().gravity, 9.81);
    }

    #[test]
    fn test_shared_between_threads() {
        let model = canonical();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    model.gravity_load(&JointConfiguration::new(i as f64, 0.0))
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let tau = handle.join().unwrap();
            assert_eq!(tau, model.gravity_load(&JointConfiguration::new(i as f64, 0.0)));
        }
    }
}
