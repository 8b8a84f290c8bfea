// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! Icosphere resolution read from YAML.
//!
//! ~~~yaml
//! frequency: 4       # optional, default 1
//! min_vertices: 1000 # optional; raises the frequency if needed
//! ~~~

use crate::{error, icosphere::icosphere_with_min_vertices, mesh::Mesh, Frequency};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Requested icosphere resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IcosphereConfig {
    /// Subdivision frequency, ν
    #[serde(default)]
    pub frequency: Frequency,
    /// Lower bound on the number of vertices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_vertices: Option<usize>,
}

impl Default for IcosphereConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::ONE,
            min_vertices: None,
        }
    }
}

impl IcosphereConfig {
    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse icosphere configuration")
    }

    /// Read from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("In {}", path.display()))
    }

    /// Frequency after applying `min_vertices`
    pub fn effective_frequency(&self) -> error::Result<Frequency> {
        match self.min_vertices {
            Some(n) => Ok(self.frequency.max(Frequency::for_min_vertices(n)?)),
            None => Ok(self.frequency),
        }
    }

    /// Build the mesh
    pub fn build(&self) -> error::Result<Mesh> {
        icosphere_with_min_vertices(self.frequency, self.min_vertices.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml() {
        let config = IcosphereConfig::from_yaml("frequency: 4").unwrap();
        assert_eq!(config.frequency.get(), 4);
        assert_eq!(config.min_vertices, None);
        assert_eq!(config.build().unwrap().vertices().len(), 162);

        let config = IcosphereConfig::from_yaml("min_vertices: 100").unwrap();
        assert_eq!(config.frequency, Frequency::ONE);
        assert_eq!(config.effective_frequency().unwrap().get(), 4);
        assert_eq!(config.build().unwrap().faces().len(), 320);

        let config = IcosphereConfig::from_yaml("{}").unwrap();
        assert_eq!(config, IcosphereConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(IcosphereConfig::from_yaml("frequency: 0").is_err());
        assert!(IcosphereConfig::from_yaml("frequency: -3").is_err());
        assert!(IcosphereConfig::from_yaml("frequency: 2.5").is_err());
        assert!(IcosphereConfig::from_yaml("radius: 2").is_err());
        assert!(IcosphereConfig::from_file("/nonexistent/icosphere.yaml").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = IcosphereConfig {
            frequency: Frequency::new(3).unwrap(),
            min_vertices: Some(500),
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(IcosphereConfig::from_yaml(&yaml).unwrap(), config);
    }
}
