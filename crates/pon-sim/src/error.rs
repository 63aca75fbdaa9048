use pon_core::{CoreError, OnuId, PathId};
use pon_dba::DbaError;
use pon_onu::OnuError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match ONU count {expected}")]
    OnuCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("window {duration} for {onu} is outside [0, horizon)")]
    InvalidWindow {
        onu:      OnuId,
        duration: f64,
    },

    #[error("candidate {path} duration {duration} is outside [0, horizon)")]
    InvalidPath {
        path:     PathId,
        duration: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("ONU error: {0}")]
    Onu(#[from] OnuError),

    #[error("planner failed: {0}")]
    Dba(#[from] DbaError),
}

pub type SimResult<T> = Result<T, SimError>;
