// SPDX-License-Identifier: Apache-2.0

pub mod index;
pub mod router;
pub mod scope;

use crate::exporters::elasticsearch::router::DocumentRouter;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration parsing.
///
/// - `InvalidMappingMode`: The mapping mode string is not one of the
///   supported modes. Recovery: set one of "none", "ecs", "otel", "bodymap".
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid mapping mode: {0}")]
    InvalidMappingMode(String),
}

/// Document mapping mode. Selects how outgoing documents are shaped and
/// whether certain routing attributes are honored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MappingMode {
    #[default]
    None,
    Ecs,
    Otel,
    BodyMap,
}

impl FromStr for MappingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(MappingMode::None),
            "ecs" => Ok(MappingMode::Ecs),
            "otel" => Ok(MappingMode::Otel),
            "bodymap" => Ok(MappingMode::BodyMap),
            _ => Err(ConfigError::InvalidMappingMode(s.to_string())),
        }
    }
}

impl fmt::Display for MappingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MappingMode::None => "none",
            MappingMode::Ecs => "ecs",
            MappingMode::Otel => "otel",
            MappingMode::BodyMap => "bodymap",
        };
        f.write_str(s)
    }
}

/// Configuration for the Elasticsearch exporter core
#[derive(Debug, Clone, Default)]
pub struct ElasticsearchExporterConfig {
    /// Mapping mode applied when routing outgoing documents
    pub mapping_mode: MappingMode,
}

impl ElasticsearchExporterConfig {
    pub fn new(mapping_mode: MappingMode) -> Self {
        Self { mapping_mode }
    }

    pub fn router(&self) -> DocumentRouter {
        DocumentRouter::new(self.mapping_mode)
    }
}
