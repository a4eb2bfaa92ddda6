use serde::{Deserialize, Serialize};

use crate::experiment_config::Fix;

#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum GeneralExperimentConfig {
    Full(FullConfig),
    AggregationOnly(AggregationOnly),
}

impl GeneralExperimentConfig {
    pub fn cfg(&self) -> FullConfig {
        match self {
            Self::Full(cfg) => *cfg,
            Self::AggregationOnly(cfg) => cfg.to_fixed(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FullConfig {
    /// Finished experiments are skipped.
    pub finished: bool,
    /// Number of iterations summarized in one statistics row.
    pub aggregation_rate: usize,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AggregationOnly {
    pub aggregation_rate: usize,
}

impl Fix<FullConfig> for AggregationOnly {
    fn to_fixed(&self) -> FullConfig {
        FullConfig {
            finished: false,
            aggregation_rate: self.aggregation_rate,
        }
    }
}
