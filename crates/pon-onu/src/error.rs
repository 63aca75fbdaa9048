use pon_core::{CoreError, OnuId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnuError {
    #[error("invalid ONU configuration: {0}")]
    Config(#[from] CoreError),

    #[error("{onu} queue holds {len} messages, capacity is {capacity}")]
    QueueOverflow {
        onu:      OnuId,
        len:      usize,
        capacity: usize,
    },

    #[error("{0} already has a message in service")]
    ServiceOverwrite(OnuId),

    #[error("{0} has no message in service")]
    NotSending(OnuId),
}

pub type OnuResult<T> = Result<T, OnuError>;
