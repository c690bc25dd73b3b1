//! Cross-checking the closed-form model against an independent inverse
//! dynamics computation. The reference is supplied by the caller through
//! [`DynamicsOracle`]; nothing here depends on how it is computed.

use crate::{
    joint_space::{JointConfiguration, JointVelocity, TorqueVector},
    model::TwoLinkDynamicsModel,
};
use std::{
    f64::consts::FRAC_PI_2,
    fmt::{self, Display, Formatter},
};
use tolerance::Tolerances;

pub trait DynamicsOracle {
    /// Joint torques holding the arm static at `q`.
    fn gravity_load(&self, q: (f64, f64)) -> (f64, f64);
    /// Inverse dynamics with zero joint acceleration and gravity disabled.
    fn rne_zero_accel(&self, q: (f64, f64), qd: (f64, f64)) -> (f64, f64);
}

pub const CANONICAL_CONFIGURATIONS: [(&str, JointConfiguration); 4] = [
    ("q1", JointConfiguration::new(0.0, 0.0)),
    ("q2", JointConfiguration::new(0.0, FRAC_PI_2)),
    ("q3", JointConfiguration::new(FRAC_PI_2, 0.0)),
    ("q4", JointConfiguration::new(FRAC_PI_2, -FRAC_PI_2)),
];

pub const CANONICAL_VELOCITY: JointVelocity = JointVelocity::new(1.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    GravityLoad,
    VelocityCoupling,
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::GravityLoad => write!(f, "gravity load"),
            Quantity::VelocityCoupling => write!(f, "velocity coupling"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub quantity: Quantity,
    pub label: String,
    pub configuration: JointConfiguration,
    pub closed_form: TorqueVector,
    pub reference: TorqueVector,
    pub agrees: bool,
}

impl Comparison {
    fn new(
        quantity: Quantity,
        label: &str,
        configuration: JointConfiguration,
        closed_form: TorqueVector,
        reference: TorqueVector,
        tolerances: &Tolerances,
    ) -> Self {
        let agrees = tolerances.check_all(&reference.to_array(), &closed_form.to_array());
        if agrees {
            tracing::debug!(%quantity, label, ?closed_form, ?reference, "closed form agrees with reference");
        } else {
            tracing::warn!(%quantity, label, ?closed_form, ?reference, "closed form disagrees with reference");
        }
        Self {
            quantity,
            label: label.to_string(),
            configuration,
            closed_form,
            reference,
            agrees,
        }
    }

    pub fn max_abs_error(&self) -> f64 {
        let diff = self.closed_form - self.reference;
        diff.tau0.abs().max(diff.tau1.abs())
    }
}

pub fn compare_gravity_load<O>(
    model: &TwoLinkDynamicsModel,
    oracle: &O,
    label: &str,
    q: &JointConfiguration,
    tolerances: &Tolerances,
) -> Comparison
where
    O: DynamicsOracle + ?Sized,
{
    let closed_form = model.gravity_load(q);
    let reference = TorqueVector::from(oracle.gravity_load(q.to_tuple()));
    Comparison::new(
        Quantity::GravityLoad,
        label,
        *q,
        closed_form,
        reference,
        tolerances,
    )
}

pub fn compare_velocity_coupling<O>(
    model: &TwoLinkDynamicsModel,
    oracle: &O,
    label: &str,
    q: &JointConfiguration,
    qd: &JointVelocity,
    tolerances: &Tolerances,
) -> Comparison
where
    O: DynamicsOracle + ?Sized,
{
    let closed_form = model.velocity_coupling(q, qd);
    let reference = TorqueVector::from(oracle.rne_zero_accel(q.to_tuple(), qd.to_tuple()));
    Comparison::new(
        Quantity::VelocityCoupling,
        label,
        *q,
        closed_form,
        reference,
        tolerances,
    )
}

/// Gravity load for every canonical configuration, then velocity coupling
/// for every canonical configuration at `qd`.
pub fn cross_check<O>(
    model: &TwoLinkDynamicsModel,
    oracle: &O,
    qd: &JointVelocity,
    tolerances: &Tolerances,
) -> Vec<Comparison>
where
    O: DynamicsOracle + ?Sized,
{
    let gravity = CANONICAL_CONFIGURATIONS
        .iter()
        .map(|(label, q)| compare_gravity_load(model, oracle, label, q, tolerances));
    let coupling = CANONICAL_CONFIGURATIONS
        .iter()
        .map(|(label, q)| compare_velocity_coupling(model, oracle, label, q, qd, tolerances));
    gravity.chain(coupling).collect()
}
