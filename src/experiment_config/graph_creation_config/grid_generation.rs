use serde::{Deserialize, Serialize};

use super::weight_generator;
use crate::experiment_config::{ExperimentConfigError, Fix};
use crate::graph::generate::{Generate, Grid};
use crate::graph::PheromoneGraph;
use crate::rng::{os_random_seed, rng64};

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct GridGeneration {
    pub seed: u64,
    pub size: (usize, usize),
    pub ew_range: (f64, f64),
}

impl GridGeneration {
    pub fn generate(&self) -> Result<PheromoneGraph<usize>, ExperimentConfigError> {
        let mut rng = rng64(self.seed as u128);
        let mut ew_gen = weight_generator(self.ew_range, &mut rng)?;

        Grid::new(self.size, &mut ew_gen)
            .generate()
            .map_err(|err| ExperimentConfigError::InvalidGraphConfig(err.to_string()))
    }
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug)]
pub struct UnseededGridGeneration {
    pub size: (usize, usize),
    pub ew_range: (f64, f64),
}

impl Fix<GridGeneration> for UnseededGridGeneration {
    fn to_fixed(&self) -> GridGeneration {
        GridGeneration {
            seed: (os_random_seed() >> 64) as u64,
            size: self.size,
            ew_range: self.ew_range,
        }
    }
}
