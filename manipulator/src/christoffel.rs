use crate::joint_space::{JointVelocity, TorqueVector};
use sim_value::SimValue;

/// Christoffel symbols of the first kind for the planar two-revolute arm.
///
/// With `h = -m2 * l1 * lc2 * sin(q1)` the only nonzero symbols are
/// `c121 = c211 = c221 = h` and `c112 = -h`. This only holds for exactly
/// this topology, another chain needs its own derivation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChristoffelSymbols<T = f64> {
    h: T,
}

impl<T> ChristoffelSymbols<T>
where
    T: SimValue,
{
    pub(crate) fn new(h: T) -> Self {
        Self { h }
    }

    pub fn h(&self) -> T {
        self.h
    }

    /// Symbol `c_ijk` in textbook (1-based) notation.
    /// Returns `None` when an index is not 1 or 2.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<T> {
        if !(1..=2).contains(&i) || !(1..=2).contains(&j) || !(1..=2).contains(&k) {
            return None;
        }
        Some(self.coefficient(i - 1, j - 1, k - 1))
    }

    fn coefficient(&self, i: usize, j: usize, k: usize) -> T {
        match (i, j, k) {
            (0, 1, 0) | (1, 0, 0) | (1, 1, 0) => self.h,
            (0, 0, 1) => -self.h,
            _ => T::zero(),
        }
    }

    /// `tau_k = sum_ij c_ijk * qd_i * qd_j`
    pub fn quadratic_form(&self, qd: &JointVelocity<T>) -> TorqueVector<T> {
        let rates = qd.to_array();
        let mut tau = [T::zero(); 2];
        for (k, tau_k) in tau.iter_mut().enumerate() {
            for (i, qd_i) in rates.iter().enumerate() {
                for (j, qd_j) in rates.iter().enumerate() {
                    let c = self.coefficient(i, j, k);
                    if c != T::zero() {
                        *tau_k = *tau_k + c * *qd_i * *qd_j;
                    }
                }
            }
        }
        TorqueVector::from(tau)
    }
}
