use pon_core::OnuId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbaError {
    #[error("optimizer configuration error: {0}")]
    Config(String),

    #[error("{paths} candidate paths cannot cover {onus} ONUs without reuse")]
    NotEnoughPaths {
        paths: usize,
        onus:  usize,
    },

    #[error("demand vector length {got} does not match ONU count {expected}")]
    DemandLengthMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("pheromone row for {0} has no positive weight among unclaimed paths")]
    DegenerateRow(OnuId),
}

pub type DbaResult<T> = Result<T, DbaError>;
