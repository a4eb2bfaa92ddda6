mod edge_list;
mod erdos_renyi_generation;
mod grid_generation;

pub use edge_list::EdgeList;
pub use erdos_renyi_generation::{ErdosRenyiGeneration, UnseededErdosRenyiGeneration};
pub use grid_generation::{GridGeneration, UnseededGridGeneration};

use serde::{Deserialize, Serialize};

use super::{ExperimentConfigError, Fix};
use crate::graph::PheromoneGraph;
use crate::rng::RandomSource;

#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum GraphCreationConfig {
    EdgeList(EdgeList),
    ErdosRenyi(ErdosRenyiGeneration),
    UnseededErdosRenyi(UnseededErdosRenyiGeneration),
    Grid(GridGeneration),
    UnseededGrid(UnseededGridGeneration),
}

impl GraphCreationConfig {
    pub fn edge_list(&self) -> Result<&EdgeList, ExperimentConfigError> {
        match self {
            Self::EdgeList(edges) => Ok(edges),
            _ => Err(ExperimentConfigError::InvalidGraphConfig(
                "config is not an edge list".to_string(),
            )),
        }
    }

    pub fn grid(&self) -> Result<GridGeneration, ExperimentConfigError> {
        match self {
            Self::Grid(grid) => Ok(*grid),
            Self::UnseededGrid(grid) => Ok(grid.to_fixed()),
            _ => Err(ExperimentConfigError::InvalidGraphConfig(
                "config is not a grid generation".to_string(),
            )),
        }
    }

    pub fn erdos_renyi(&self) -> Result<ErdosRenyiGeneration, ExperimentConfigError> {
        match self {
            Self::ErdosRenyi(erdos_renyi) => Ok(*erdos_renyi),
            Self::UnseededErdosRenyi(erdos_renyi) => Ok(erdos_renyi.to_fixed()),
            _ => Err(ExperimentConfigError::InvalidGraphConfig(
                "config is not an Erdos-Renyi generation".to_string(),
            )),
        }
    }

    pub fn generate(&self) -> Result<PheromoneGraph<usize>, ExperimentConfigError> {
        match self {
            Self::EdgeList(_) => self.edge_list()?.build(),
            Self::Grid(_) | Self::UnseededGrid(_) => self.grid()?.generate(),
            Self::ErdosRenyi(_) | Self::UnseededErdosRenyi(_) => self.erdos_renyi()?.generate(),
        }
    }
}

/// Uniform edge weights in `[low, high)`.
fn weight_generator<'a>(
    ew_range: (f64, f64),
    rng: &'a mut dyn RandomSource,
) -> Result<impl FnMut() -> f64 + 'a, ExperimentConfigError> {
    let (low, high) = ew_range;
    if !(low >= 0.0 && low <= high && high.is_finite()) {
        return Err(ExperimentConfigError::InvalidGraphConfig(format!(
            "edge weight range ({}, {}) is not a valid non-negative range",
            low, high
        )));
    }

    let delta = high - low;
    Ok(move || rng.next_float() * delta + low)
}
