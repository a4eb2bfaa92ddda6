use serde::{Deserialize, Serialize};

use crate::experiment_config::Fix;
use crate::metaheuristic::aco::Params;
use crate::rng::os_random_seed;

fn default_min_pheromone() -> f64 {
    0.1
}

fn default_elitist_weight() -> f64 {
    2.0
}

#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct AcoExperiment {
    pub evaporation_rate: f64,
    pub pheromone_intensity: f64,
    pub alpha: f64,
    pub beta: f64,
    pub num_ants: usize,
    pub num_iterations: usize,
    #[serde(default = "default_min_pheromone")]
    pub min_pheromone: f64,
    #[serde(default = "default_elitist_weight")]
    pub elitist_weight: f64,
    pub seed: u64,
}

impl AcoExperiment {
    pub fn params(&self) -> Params {
        Params::new(
            self.alpha,
            self.beta,
            self.evaporation_rate,
            self.pheromone_intensity,
            self.elitist_weight,
            self.min_pheromone,
            self.num_ants,
            self.num_iterations,
            Some(self.seed as u128),
        )
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UnseededAcoExperiment {
    pub evaporation_rate: f64,
    pub pheromone_intensity: f64,
    pub alpha: f64,
    pub beta: f64,
    pub num_ants: usize,
    pub num_iterations: usize,
    #[serde(default = "default_min_pheromone")]
    pub min_pheromone: f64,
    #[serde(default = "default_elitist_weight")]
    pub elitist_weight: f64,
}

impl Fix<AcoExperiment> for UnseededAcoExperiment {
    fn to_fixed(&self) -> AcoExperiment {
        AcoExperiment {
            evaporation_rate: self.evaporation_rate,
            pheromone_intensity: self.pheromone_intensity,
            alpha: self.alpha,
            beta: self.beta,
            num_ants: self.num_ants,
            num_iterations: self.num_iterations,
            min_pheromone: self.min_pheromone,
            elitist_weight: self.elitist_weight,
            seed: (os_random_seed() >> 64) as u64,
        }
    }
}
