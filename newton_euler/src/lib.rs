//! Recursive Newton-Euler inverse dynamics for the planar two-link arm.
//!
//! Used as an independent reference for the closed-form model: it never
//! touches the Lagrangian expressions, only rigid-body kinematics swept
//! outward and forces swept inward along the chain.

use manipulator::{TwoLinkDynamicsModel, validation::DynamicsOracle};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarLink {
    pub mass: f64,
    pub length: f64,
    pub center_of_mass: f64,
    /// moment of inertia about the center of mass, normal to the plane
    pub inertia_zz: f64,
}

impl PlanarLink {
    pub fn new(mass: f64, length: f64, center_of_mass: f64, inertia_zz: f64) -> Self {
        Self {
            mass,
            length,
            center_of_mass,
            inertia_zz,
        }
    }
}

/// Per-link quantities, all expressed in the base frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct RneCache {
    pub omega: Vector3<f64>,
    pub alpha: Vector3<f64>,
    /// joint origin to center of mass
    pub r_com: Vector3<f64>,
    /// joint origin to the next joint
    pub r_link: Vector3<f64>,
    pub a_com: Vector3<f64>,
    /// force exerted on this link through its inner joint
    pub f: Vector3<f64>,
    /// moment exerted on this link through its inner joint, about the joint
    pub n: Vector3<f64>,
}

/// Two links joined by revolute joints about z. Zero angle points along +x.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoLinkChain {
    pub links: [PlanarLink; 2],
    pub gravity: Vector3<f64>,
}

impl TwoLinkChain {
    /// `g` is the magnitude of gravity acting along -y
    pub fn new(links: [PlanarLink; 2], g: f64) -> Self {
        Self {
            links,
            gravity: Vector3::new(0.0, -g, 0.0),
        }
    }

    pub fn inverse_dynamics(
        &self,
        q: &Vector2<f64>,
        qd: &Vector2<f64>,
        qdd: &Vector2<f64>,
        with_gravity: bool,
    ) -> Vector2<f64> {
        let mut caches = self.rne_first_pass(q, qd, qdd, with_gravity);
        self.rne_second_pass(&mut caches);
        let tau = Vector2::new(caches[0].n.z, caches[1].n.z);
        tracing::trace!(?q, ?qd, ?qdd, with_gravity, ?tau, "recursive newton-euler");
        tau
    }

    /// Outward sweep. Gravity enters as an upward acceleration of the base.
    fn rne_first_pass(
        &self,
        q: &Vector2<f64>,
        qd: &Vector2<f64>,
        qdd: &Vector2<f64>,
        with_gravity: bool,
    ) -> [RneCache; 2] {
        let z = Vector3::<f64>::z();
        let mut caches = [RneCache::default(); 2];

        let mut theta = 0.0_f64;
        let mut omega = Vector3::<f64>::zeros();
        let mut alpha = Vector3::<f64>::zeros();
        let mut a_joint = if with_gravity {
            -self.gravity
        } else {
            Vector3::zeros()
        };

        for (i, (link, cache)) in self.links.iter().zip(caches.iter_mut()).enumerate() {
            theta += q[i];
            // axes are parallel so omega x (z * qd) vanishes
            omega += z * qd[i];
            alpha += z * qdd[i];

            let direction = Vector3::new(theta.cos(), theta.sin(), 0.0);
            let r_com = direction * link.center_of_mass;
            let r_link = direction * link.length;

            cache.omega = omega;
            cache.alpha = alpha;
            cache.r_com = r_com;
            cache.r_link = r_link;
            cache.a_com = a_joint + alpha.cross(&r_com) + omega.cross(&omega.cross(&r_com));

            a_joint += alpha.cross(&r_link) + omega.cross(&omega.cross(&r_link));
        }
        caches
    }

    /// Inward sweep of joint reaction forces and moments.
    fn rne_second_pass(&self, caches: &mut [RneCache; 2]) {
        let mut f_outer = Vector3::<f64>::zeros();
        let mut n_outer = Vector3::<f64>::zeros();

        for (link, cache) in self.links.iter().zip(caches.iter_mut()).rev() {
            let force = cache.a_com * link.mass;
            let moment = cache.alpha * link.inertia_zz;

            cache.f = force + f_outer;
            cache.n = moment + n_outer + cache.r_com.cross(&force) + cache.r_link.cross(&f_outer);

            f_outer = cache.f;
            n_outer = cache.n;
        }
    }
}

impl From<&TwoLinkDynamicsModel> for TwoLinkChain {
    fn from(model: &TwoLinkDynamicsModel) -> Self {
        let link = |p: &manipulator::LinkParameters| {
            PlanarLink::new(p.mass, p.length, p.center_of_mass, 0.0)
        };
        Self::new(
            [link(model.link1()), link(model.link2())],
            model.environment().gravity,
        )
    }
}

impl DynamicsOracle for TwoLinkChain {
    fn gravity_load(&self, q: (f64, f64)) -> (f64, f64) {
        let tau = self.inverse_dynamics(
            &Vector2::new(q.0, q.1),
            &Vector2::zeros(),
            &Vector2::zeros(),
            true,
        );
        (tau[0], tau[1])
    }

    fn rne_zero_accel(&self, q: (f64, f64), qd: (f64, f64)) -> (f64, f64) {
        let tau = self.inverse_dynamics(
            &Vector2::new(q.0, q.1),
            &Vector2::new(qd.0, qd.1),
            &Vector2::zeros(),
            false,
        );
        (tau[0], tau[1])
    }
}
