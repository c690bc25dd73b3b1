use crate::{
    model::TwoLinkDynamicsModel,
    parameters::{EnvironmentParameters, InvalidParameterError, LinkParameters},
};
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigErrors {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parameter(#[from] InvalidParameterError),
    #[error("could not parse model config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize model config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Serializable description of an arm, e.g.
///
/// ```ron
/// (
///     link1: (mass: 1.0, length: 1.0, center_of_mass: 0.5),
///     link2: (mass: 1.0, length: 1.0, center_of_mass: 0.5),
///     environment: (gravity: 9.81),
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub link1: LinkParameters,
    pub link2: LinkParameters,
    #[serde(default)]
    pub environment: EnvironmentParameters,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let link = LinkParameters::new(1.0, 1.0, 0.5);
        Self {
            link1: link,
            link2: link,
            environment: EnvironmentParameters::EARTH,
        }
    }
}

impl ModelConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let mut file = File::open(path)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        let config = Self::from_ron(&content)?;
        tracing::debug!(path = %path.display(), "loaded model config");
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigErrors> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigErrors> {
        Ok(to_string_pretty(self, PrettyConfig::new())?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigErrors> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Values read from a file are validated here, not at parse time
    pub fn build(&self) -> Result<TwoLinkDynamicsModel, ConfigErrors> {
        Ok(TwoLinkDynamicsModel::new(
            self.link1,
            self.link2,
            self.environment,
        )?)
    }
}
