//! Politeness pacing between successive per-listing operations.

use std::time::Duration;

use rand::Rng;

/// Advisory rate shaping against the external site: every [`Pacer::pace`]
/// call sleeps for a duration drawn uniformly from the configured interval.
///
/// Holds no state beyond its bounds, so it is freely shareable; the pipeline
/// only ever paces sequentially within one job.
#[derive(Debug, Clone)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Builds a pacer sleeping between `min_ms` and `max_ms` milliseconds.
    /// Inverted bounds are swapped rather than rejected.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    /// Suspends the calling task for a uniformly random delay in
    /// `[min, max]`.
    pub async fn pace(&self) {
        let delay = if self.min == self.max {
            self.min
        } else {
            rand::rng().random_range(self.min..=self.max)
        };
        tracing::trace!(delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), "politeness delay");
        tokio::time::sleep(delay).await;
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }
}
