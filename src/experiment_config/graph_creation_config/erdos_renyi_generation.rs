use serde::{Deserialize, Serialize};

use super::weight_generator;
use crate::experiment_config::{ExperimentConfigError, Fix};
use crate::graph::generate::{ErdosRenyi, Generate};
use crate::graph::PheromoneGraph;
use crate::rng::{os_random_seed, rng64, RandomSource};

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct ErdosRenyiGeneration {
    pub seed: u64,
    pub size: usize,
    pub ew_range: (f64, f64),
    pub connection_probability: f64,
}

impl ErdosRenyiGeneration {
    pub fn generate(&self) -> Result<PheromoneGraph<usize>, ExperimentConfigError> {
        if !(0.0..=1.0).contains(&self.connection_probability) {
            return Err(ExperimentConfigError::InvalidGraphConfig(format!(
                "connection probability {} is not in [0, 1]",
                self.connection_probability
            )));
        }

        let mut graph_rng = rng64(self.seed as u128);
        let mut weight_rng = rng64(graph_rng.next_seed());
        let mut ew_gen = weight_generator(self.ew_range, &mut weight_rng)?;

        ErdosRenyi::new(
            self.size,
            self.connection_probability,
            &mut ew_gen,
            &mut graph_rng,
        )
        .generate()
        .map_err(|err| ExperimentConfigError::InvalidGraphConfig(err.to_string()))
    }
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug)]
pub struct UnseededErdosRenyiGeneration {
    pub size: usize,
    pub ew_range: (f64, f64),
    pub connection_probability: f64,
}

impl Fix<ErdosRenyiGeneration> for UnseededErdosRenyiGeneration {
    fn to_fixed(&self) -> ErdosRenyiGeneration {
        ErdosRenyiGeneration {
            seed: (os_random_seed() >> 64) as u64,
            size: self.size,
            ew_range: self.ew_range,
            connection_probability: self.connection_probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_graph() {
        let config = ErdosRenyiGeneration {
            seed: 12,
            size: 15,
            ew_range: (1.0, 3.0),
            connection_probability: 0.4,
        };
        let a = config.generate().unwrap();
        let b = config.generate().unwrap();

        assert_eq!(a.edge_ids(), b.edge_ids());
        for ((_, x), (_, y)) in a.iter_edges().zip(b.iter_edges()) {
            assert_eq!(x.weight, y.weight);
            assert!(x.weight >= 1.0 && x.weight < 3.0);
        }
    }

    #[test]
    fn probability_out_of_range_errors() {
        let config = ErdosRenyiGeneration {
            seed: 12,
            size: 5,
            ew_range: (1.0, 3.0),
            connection_probability: 1.5,
        };

        assert!(config.generate().is_err());
    }
}
