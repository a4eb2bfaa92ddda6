use crate::rng::os_random_seed;

/// Parameters of one optimization run.
///
/// # Examples
///
/// ```
/// use spp_with_aco::metaheuristic::aco::Params;
///
/// let params = Params::default()
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_evaporation_rate(0.5)
///     .with_num_ants(20)
///     .with_seed(7);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Exponent on the pheromone level in the transition rule.
    pub alpha: f64,
    /// Exponent on the inverse edge weight in the transition rule.
    pub beta: f64,
    /// Fraction of pheromone lost on every edge per iteration, in (0, 1].
    pub evaporation_rate: f64,
    /// Scale of the deposit `pheromone_intensity / length`.
    pub pheromone_intensity: f64,
    /// Extra deposit factor for the best known path.
    pub elitist_weight: f64,
    /// No edge ever drops below this pheromone level.
    pub min_pheromone: f64,
    pub num_ants: usize,
    pub num_iterations: usize,
    pub seed: u128,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            pheromone_intensity: 1.0,
            elitist_weight: 2.0,
            min_pheromone: 0.1,
            num_ants: 10,
            num_iterations: 20,
            seed: os_random_seed(),
        }
    }
}

impl Params {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        alpha: f64,
        beta: f64,
        evaporation_rate: f64,
        pheromone_intensity: f64,
        elitist_weight: f64,
        min_pheromone: f64,
        num_ants: usize,
        num_iterations: usize,
        seed: Option<u128>,
    ) -> Self {
        Params {
            alpha,
            beta,
            evaporation_rate,
            pheromone_intensity,
            elitist_weight,
            min_pheromone,
            num_ants,
            num_iterations,
            seed: seed.unwrap_or_else(os_random_seed),
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_pheromone_intensity(mut self, intensity: f64) -> Self {
        self.pheromone_intensity = intensity;
        self
    }

    pub fn with_elitist_weight(mut self, weight: f64) -> Self {
        self.elitist_weight = weight;
        self
    }

    pub fn with_min_pheromone(mut self, min_pheromone: f64) -> Self {
        self.min_pheromone = min_pheromone;
        self
    }

    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_num_iterations(mut self, n: usize) -> Self {
        self.num_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u128) -> Self {
        self.seed = seed;
        self
    }

    /// Checks every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.evaporation_rate > 0.0 && self.evaporation_rate <= 1.0) {
            return Err(format!(
                "evaporation_rate must be in (0, 1], got {}",
                self.evaporation_rate
            ));
        }
        if !(self.pheromone_intensity > 0.0 && self.pheromone_intensity.is_finite()) {
            return Err(format!(
                "pheromone_intensity must be positive, got {}",
                self.pheromone_intensity
            ));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(format!("alpha must not be negative, got {}", self.alpha));
        }
        if !(self.beta >= 0.0 && self.beta.is_finite()) {
            return Err(format!("beta must not be negative, got {}", self.beta));
        }
        if !(self.elitist_weight >= 0.0 && self.elitist_weight.is_finite()) {
            return Err(format!(
                "elitist_weight must not be negative, got {}",
                self.elitist_weight
            ));
        }
        if !(self.min_pheromone > 0.0 && self.min_pheromone.is_finite()) {
            return Err(format!(
                "min_pheromone must be positive, got {}",
                self.min_pheromone
            ));
        }
        if self.num_ants == 0 {
            return Err("num_ants must be at least 1".into());
        }
        if self.num_iterations == 0 {
            return Err("num_iterations must be at least 1".into());
        }
        Ok(())
    }
}
