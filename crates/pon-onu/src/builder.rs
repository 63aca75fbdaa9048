//! Fluent builder for the OLT's endpoint list.
//!
//! # Usage
//!
//! ```rust
//! use pon_core::{Horizon, OnuConfig};
//! use pon_onu::OnuSetBuilder;
//!
//! let onus = OnuSetBuilder::new(/*seed=*/ 42, Horizon::default())
//!     .onu(OnuConfig::new(30.0, 0.12, 512))
//!     .repeat(OnuConfig::new(30.0, 0.04, 512), 3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(onus.len(), 4);
//! assert_eq!(onus[3].id().index(), 3);
//! ```

use pon_core::{Horizon, OnuConfig, OnuId, OnuRng};

use crate::{ArrivalProcess, Onu, OnuResult};

/// Collects per-endpoint configs, then validates and seeds them in one pass.
///
/// Each ONU receives its own `OnuRng` derived from the global seed and its
/// index, so no arrival state is ever shared between endpoints.
pub struct OnuSetBuilder {
    seed:    u64,
    horizon: Horizon,
    configs: Vec<OnuConfig>,
}

impl OnuSetBuilder {
    pub fn new(seed: u64, horizon: Horizon) -> Self {
        Self { seed, horizon, configs: Vec::new() }
    }

    /// Append one endpoint.
    pub fn onu(mut self, config: OnuConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Append `n` endpoints sharing the same parameters.
    pub fn repeat(mut self, config: OnuConfig, n: usize) -> Self {
        self.configs.extend(std::iter::repeat_n(config, n));
        self
    }

    /// Append endpoints from any iterator of configs.
    pub fn onus<I: IntoIterator<Item = OnuConfig>>(mut self, configs: I) -> Self {
        self.configs.extend(configs);
        self
    }

    /// Validate every config and construct the ONUs in index order.
    pub fn build(self) -> OnuResult<Vec<Onu>> {
        self.configs
            .iter()
            .enumerate()
            .map(|(i, config)| -> OnuResult<Onu> {
                config.validate()?;
                let id = OnuId(i as u32);
                let arrivals = ArrivalProcess::new(config, self.horizon, OnuRng::new(self.seed, id));
                Ok(Onu::new(id, config, self.horizon, arrivals))
            })
            .collect()
    }
}
