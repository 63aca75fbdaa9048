//! The pheromone weight matrix.

use pon_core::OnuId;

use crate::{DbaError, DbaResult};

/// One row of non-negative weights per ONU, one column per candidate path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneMatrix {
    rows: Vec<Vec<f64>>,
}

impl PheromoneMatrix {
    /// A matrix with every weight set to `initial`.
    pub fn new(onu_count: usize, path_count: usize, initial: f64) -> Self {
        Self { rows: vec![vec![initial; path_count]; onu_count] }
    }

    #[inline]
    pub fn onu_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn path_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn row(&self, onu: OnuId) -> &[f64] {
        &self.rows[onu.index()]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Multiply every weight by `retention`.
    pub fn evaporate(&mut self, retention: f64) {
        for w in self.rows.iter_mut().flatten() {
            *w *= retention;
        }
    }

    /// Add `scale / (|path - demand| + epsilon)` to each weight of `onu`'s row.
    pub fn reinforce(&mut self, onu: OnuId, demand: f64, time_paths: &[f64], scale: f64, epsilon: f64) {
        for (w, &path) in self.rows[onu.index()].iter_mut().zip(time_paths) {
            *w += scale / ((path - demand).abs() + epsilon);
        }
    }

    /// Add `floor` to every weight.
    pub fn apply_floor(&mut self, floor: f64) {
        for w in self.rows.iter_mut().flatten() {
            *w += floor;
        }
    }

    /// Selection probabilities for `onu` over the `available` path indices,
    /// in the order given.  Sums to one.
    ///
    /// Fails if the restricted weights do not have a finite positive sum.
    pub fn restricted_probabilities(&self, onu: OnuId, available: &[usize]) -> DbaResult<Vec<f64>> {
        let row = self.row(onu);
        let weights: Vec<f64> = available.iter().map(|&p| row[p]).collect();
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(DbaError::DegenerateRow(onu));
        }
        Ok(weights.into_iter().map(|w| w / total).collect())
    }

    /// `true` if every weight is finite and strictly positive.
    pub fn is_strictly_positive(&self) -> bool {
        self.rows.iter().flatten().all(|w| w.is_finite() && *w > 0.0)
    }
}
