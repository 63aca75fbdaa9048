//! Pheromone-weighted stochastic window optimizer.

use rand::distributions::{Distribution, WeightedIndex};

use pon_core::{OnuId, PathId, SimRng};

use crate::{AcoConfig, Assignment, DbaError, DbaResult, PheromoneMatrix, WindowPlanner};

/// Ant-colony style allocator over a fixed menu of window durations.
///
/// Distance from observed demand stands in for path cost: each round the
/// weights of durations close to an ONU's demand are reinforced and every
/// weight evaporates.  Durations are then drawn per ONU without replacement,
/// so no two ONUs receive the same candidate in one round.
pub struct PheromoneOptimizer {
    config:    AcoConfig,
    pheromone: PheromoneMatrix,
}

impl PheromoneOptimizer {
    /// Validate `config` and initialize a uniform matrix.
    pub fn new(config: AcoConfig) -> DbaResult<Self> {
        config.validate()?;
        let pheromone = PheromoneMatrix::new(
            config.onu_count,
            config.time_paths.len(),
            config.initial_weight,
        );
        Ok(Self { config, pheromone })
    }

    pub fn matrix(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    /// Evaporate, reinforce toward `demand`, then apply the floor.
    pub fn update(&mut self, demand: &[f64]) -> DbaResult<()> {
        if demand.len() != self.config.onu_count {
            return Err(DbaError::DemandLengthMismatch {
                expected: self.config.onu_count,
                got:      demand.len(),
            });
        }
        let scale = self.config.learning_rate * self.config.weight_gain;

        self.pheromone.evaporate(self.config.retention);
        for (i, &d) in demand.iter().enumerate() {
            self.pheromone.reinforce(
                OnuId(i as u32),
                d,
                &self.config.time_paths,
                scale,
                self.config.epsilon,
            );
        }
        self.pheromone.apply_floor(self.config.floor);
        Ok(())
    }

    /// Draw one path per ONU, without replacement, in a shuffled ONU order.
    pub fn sample_assignment(&self, rng: &mut SimRng) -> DbaResult<Assignment> {
        let onu_count = self.config.onu_count;

        let mut order: Vec<usize> = (0..onu_count).collect();
        rng.shuffle(&mut order);

        let mut available: Vec<usize> = (0..self.config.time_paths.len()).collect();
        let mut durations = vec![0.0; onu_count];
        let mut paths = vec![PathId(0); onu_count];

        for i in order {
            let onu = OnuId(i as u32);
            let probs = self.pheromone.restricted_probabilities(onu, &available)?;
            let dist = WeightedIndex::new(&probs).map_err(|_| DbaError::DegenerateRow(onu))?;
            let path = available.remove(dist.sample(rng.inner()));
            durations[i] = self.config.time_paths[path];
            paths[i] = PathId(path as u32);
        }

        Ok(Assignment { durations, paths })
    }
}

impl WindowPlanner for PheromoneOptimizer {
    fn plan(&mut self, demand: &[f64], rng: &mut SimRng) -> DbaResult<Option<Assignment>> {
        self.update(demand)?;
        self.sample_assignment(rng).map(Some)
    }

    fn time_paths(&self) -> &[f64] {
        &self.config.time_paths
    }

    fn pheromone(&self) -> Option<&PheromoneMatrix> {
        Some(&self.pheromone)
    }
}
