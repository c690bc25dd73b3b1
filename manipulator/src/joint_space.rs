//! Two-element joint-space values. Index 0 is always the base (shoulder)
//! joint and index 1 the elbow joint.

use nalgebra::{Scalar, Vector2};
use serde::{Deserialize, Serialize};
use sim_value::SimValue;
use std::ops::{Add, Index, Mul, Neg, Sub};

macro_rules! joint_pair {
    ($(#[$meta:meta])* $name:ident, $first:ident, $second:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name<T = f64> {
            pub $first: T,
            pub $second: T,
        }

        impl<T> $name<T> {
            pub const fn new($first: T, $second: T) -> Self {
                Self { $first, $second }
            }
        }

        impl<T: Copy> $name<T> {
            pub fn to_array(&self) -> [T; 2] {
                [self.$first, self.$second]
            }

            pub fn to_tuple(&self) -> (T, T) {
                (self.$first, self.$second)
            }
        }

        impl<T> From<[T; 2]> for $name<T> {
            fn from([$first, $second]: [T; 2]) -> Self {
                Self { $first, $second }
            }
        }

        impl<T> From<(T, T)> for $name<T> {
            fn from(($first, $second): (T, T)) -> Self {
                Self { $first, $second }
            }
        }

        impl<T> From<$name<T>> for (T, T) {
            fn from(value: $name<T>) -> Self {
                (value.$first, value.$second)
            }
        }

        impl<T: Scalar> From<Vector2<T>> for $name<T> {
            fn from(v: Vector2<T>) -> Self {
                Self::new(v[0].clone(), v[1].clone())
            }
        }

        impl<T: Scalar> From<$name<T>> for Vector2<T> {
            fn from(value: $name<T>) -> Self {
                Vector2::new(value.$first, value.$second)
            }
        }

        impl<T> Index<usize> for $name<T> {
            type Output = T;
            fn index(&self, index: usize) -> &T {
                match index {
                    0 => &self.$first,
                    1 => &self.$second,
                    _ => panic!(
                        "index {} out of range for {}, a two-joint value",
                        index,
                        stringify!($name)
                    ),
                }
            }
        }
    };
}

joint_pair!(
    /// Joint angles in radians. Unconstrained, every operation is periodic.
    JointConfiguration,
    q0,
    q1
);

joint_pair!(
    /// Joint angular velocities in radians per second.
    JointVelocity,
    qd0,
    qd1
);

joint_pair!(
    /// One generalized force per joint, newton-meters for SI inputs.
    TorqueVector,
    tau0,
    tau1
);

impl<T: SimValue> JointVelocity<T> {
    pub fn zeros() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T: SimValue> TorqueVector<T> {
    pub fn zeros() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T: SimValue> Add for TorqueVector<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.tau0 + rhs.tau0, self.tau1 + rhs.tau1)
    }
}

impl<T: SimValue> Sub for TorqueVector<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.tau0 - rhs.tau0, self.tau1 - rhs.tau1)
    }
}

impl<T: SimValue> Neg for TorqueVector<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.tau0, -self.tau1)
    }
}

impl<T: SimValue> Mul<T> for TorqueVector<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.tau0 * rhs, self.tau1 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_preserved() {
        let q = JointConfiguration::from([0.1, 0.2]);
        assert_eq!(q[0], 0.1);
        assert_eq!(q[1], 0.2);
        assert_eq!(q.to_tuple(), (0.1, 0.2));

        let v: Vector2<f64> = JointVelocity::new(3.0, 4.0).into();
        assert_eq!(v, Vector2::new(3.0, 4.0));
        assert_eq!(TorqueVector::from(v), TorqueVector::new(3.0, 4.0));
    }

    #[test]
    fn test_torque_arithmetic() {
        let a = TorqueVector::new(1.0, 2.0);
        let b = TorqueVector::new(0.5, -1.0);
        assert_eq!(a + b, TorqueVector::new(1.5, 1.0));
        assert_eq!(a - b, TorqueVector::new(0.5, 3.0));
        assert_eq!(-a, TorqueVector::new(-1.0, -2.0));
        assert_eq!(a * 2.0, TorqueVector::new(2.0, 4.0));
        assert_eq!(TorqueVector::<f64>::zeros(), TorqueVector::new(0.0, 0.0));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        let tau = TorqueVector::new(1.0, 2.0);
        let _ = tau[2];
    }
}
