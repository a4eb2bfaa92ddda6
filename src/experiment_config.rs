mod algo_config;
mod general_experiment_config;
mod graph_creation_config;
mod route_config;

pub use algo_config::{AcoExperiment, AlgoConfig, UnseededAcoExperiment};
pub use general_experiment_config::{AggregationOnly, FullConfig, GeneralExperimentConfig};
pub use graph_creation_config::{
    EdgeList, ErdosRenyiGeneration, GraphCreationConfig, GridGeneration,
    UnseededErdosRenyiGeneration, UnseededGridGeneration,
};
pub use route_config::RouteConfig;

use crate::graph::PheromoneGraph;
use crate::metaheuristic::aco::Params;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Turns a config variant with optional fields (usually a missing seed) into the complete one.
pub trait Fix<CorrectType> {
    fn to_fixed(&self) -> CorrectType;
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ExperimentConfig {
    pub experiment: GeneralExperimentConfig,
    pub algorithm: AlgoConfig,
    pub graph_creation: GraphCreationConfig,
    pub route: RouteConfig,
}

impl ExperimentConfig {
    /// Reads a config file. `.ron` files are parsed as RON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExperimentConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ExperimentConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ExperimentConfigError> {
        Ok(ron::de::from_str(content)?)
    }

    /// Run parameters, fixed and validated.
    pub fn params(&self) -> Result<Params, ExperimentConfigError> {
        let params = self.algorithm.aco().params();
        params
            .validate()
            .map_err(ExperimentConfigError::InvalidAlgorithmConfig)?;
        Ok(params)
    }

    pub fn graph(&self) -> Result<PheromoneGraph<usize>, ExperimentConfigError> {
        self.graph_creation.generate()
    }
}

#[derive(Error, Debug)]
pub enum ExperimentConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid yaml config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid ron config: {0}")]
    Ron(#[from] ron::Error),
    #[error("invalid graph config: {0}")]
    InvalidGraphConfig(String),
    #[error("invalid algorithm config: {0}")]
    InvalidAlgorithmConfig(String),
}
