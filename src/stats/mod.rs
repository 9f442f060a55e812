//! Read population statistics.
//!
//! [`ReadSampler`] consumes a bounded window of decoded alignment records and
//! produces read length, insert size and mapping quality summaries using
//! [`RunningStats`], together with a paired/single vote and a sequencer
//! platform guessed from the first read name.
//!
//! The long-read correction is an explicit second step: call
//! [`ReadSampler::compute`], check [`ReadSampler::needs_long_read_pass`], and
//! recompute with [`ReadSampler::long_read_limit`], or let
//! [`ReadSampler::sample_with_refinement`] do both.

pub mod idxstats;
pub mod platform;
pub mod sampler;
pub mod welford;

pub use platform::PlatformLookup;
pub use sampler::{InsufficientData, ReadSampler, SampleStatistics, SamplerConfig, StatsError};
pub use welford::{RunningStats, Summary};
