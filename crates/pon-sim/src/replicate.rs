//! Independent replications of one experiment across seeds.
//!
//! Each replication builds its own [`Olt`] from the factory, so ONUs, planner
//! state, and RNG streams are never shared between runs.  With the `parallel`
//! feature the runs execute on Rayon's thread pool; results are returned in
//! seed order either way.

use pon_dba::WindowPlanner;

use crate::metrics::MetricsSnapshot;
use crate::{NoopObserver, Olt, SimResult};

/// Build and run one simulation per seed, returning each run's final metrics.
///
/// The factory receives the seed and must return a fresh, unstarted `Olt`.
/// The first failing run aborts the whole batch.
pub fn run_replications<P, F>(seeds: &[u64], factory: F) -> SimResult<Vec<MetricsSnapshot>>
where
    P: WindowPlanner,
    F: Fn(u64) -> SimResult<Olt<P>> + Sync,
{
    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(&factory, seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_one(&factory, seed)).collect()
    }
}

fn run_one<P, F>(factory: &F, seed: u64) -> SimResult<MetricsSnapshot>
where
    P: WindowPlanner,
    F: Fn(u64) -> SimResult<Olt<P>>,
{
    let mut olt = factory(seed)?;
    olt.run_to_end(&mut NoopObserver)?;
    Ok(olt.metrics_snapshot())
}
