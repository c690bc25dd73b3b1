use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    abs_tol: f64,
    rel_tol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs_tol: 1e-9,
            rel_tol: 0.0,
        }
    }
}

impl Tolerances {
    pub fn new(rel_tol: f64, abs_tol: f64) -> Self {
        Self { rel_tol, abs_tol }
    }

    /// Pure absolute tolerance, relative check disabled
    pub fn absolute(abs_tol: f64) -> Self {
        Self {
            abs_tol,
            rel_tol: 0.0,
        }
    }

    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    pub fn check_error(&self, x0: f64, xf: f64) -> bool {
        check_error(x0, xf, self.rel_tol, self.abs_tol)
    }

    /// Every component pair must pass
    pub fn check_all(&self, x0: &[f64], xf: &[f64]) -> bool {
        x0.len() == xf.len()
            && x0
                .iter()
                .zip(xf)
                .all(|(a, b)| self.check_error(*a, *b))
    }
}

pub fn check_error(x0: f64, xf: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if !x0.is_finite() || !xf.is_finite() {
        return false;
    }
    let abs_diff = (xf - x0).abs();
    if abs_diff <= abs_tol {
        return true;
    }
    // relative error is meaningless against a reference at zero
    x0.abs() > 1e-10 && abs_diff / x0.abs() <= rel_tol
}
