pub mod christoffel;
pub mod config;
pub mod joint_space;
pub mod model;
pub mod parameters;
pub mod validation;

pub use christoffel::ChristoffelSymbols;
pub use config::{ConfigErrors, ModelConfig};
pub use joint_space::{JointConfiguration, JointVelocity, TorqueVector};
pub use model::TwoLinkDynamicsModel;
pub use parameters::{
    EnvironmentParameters, InvalidParameterError, LinkIndex, LinkParameters, Parameter,
};
