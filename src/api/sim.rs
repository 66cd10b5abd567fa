use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::error::{Error, Result};

/// Latency window and failure probability of the simulated network.
#[derive(Debug, Clone, Copy)]
pub struct SimProfile {
    pub latency_min: Duration,
    pub latency_max: Duration,
    pub failure_rate: f64,
}

impl Default for SimProfile {
    fn default() -> Self {
        Self {
            latency_min: Duration::from_millis(200),
            latency_max: Duration::from_millis(1200),
            failure_rate: 0.08,
        }
    }
}

impl SimProfile {
    /// No latency, no failures.
    pub fn instant() -> Self {
        Self {
            latency_min: Duration::ZERO,
            latency_max: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    /// No latency, every call fails.
    pub fn always_failing() -> Self {
        Self {
            latency_min: Duration::ZERO,
            latency_max: Duration::ZERO,
            failure_rate: 1.0,
        }
    }
}

/// Uniform draws feeding the boundary, split per concern so a scripted test
/// source can pin failure outcomes without disturbing latency.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform in [0, 1); positions the latency inside the profile window.
    fn latency_fraction(&self) -> f64;
    /// Uniform in [0, 1); a draw below the failure rate fails the call.
    fn failure_roll(&self) -> f64;
}

/// Default source backed by the thread-local generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn latency_fraction(&self) -> f64 {
        rand::thread_rng().gen()
    }

    fn failure_roll(&self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// The simulated network in front of the record operations. Every call
/// sleeps somewhere inside the latency window, then fails with probability
/// `failure_rate` before the wrapped operation is polled, so an injected
/// failure can never leave a partial write behind. Each call rolls
/// independently; the gate keeps no memory between calls.
#[derive(Clone)]
pub struct Simulation {
    profile: SimProfile,
    random: Arc<dyn RandomSource>,
}

impl Simulation {
    pub fn new(profile: SimProfile) -> Self {
        Self::with_random(profile, Arc::new(ThreadRandom))
    }

    pub fn with_random(profile: SimProfile, random: Arc<dyn RandomSource>) -> Self {
        Self { profile, random }
    }

    pub async fn call<T>(&self, op: &'static str, run: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::sleep(self.draw_latency()).await;

        if self.random.failure_roll() < self.profile.failure_rate {
            tracing::warn!(op, "injected simulated failure");
            return Err(Error::Simulated);
        }
        run.await
    }

    fn draw_latency(&self) -> Duration {
        let window = self
            .profile
            .latency_max
            .saturating_sub(self.profile.latency_min);
        if window.is_zero() {
            return self.profile.latency_min;
        }
        self.profile.latency_min + window.mul_f64(self.random.latency_fraction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn happy_path_runs_the_operation() {
        let sim = Simulation::new(SimProfile::instant());
        let result = sim.call("test.op", async { Ok(42) }).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn injected_failure_fires_before_the_operation() {
        let sim = Simulation::new(SimProfile::always_failing());
        let calls = AtomicUsize::new(0);

        let err = sim
            .call("test.op", async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Simulated));
        assert_eq!(err.to_string(), "Simulated API failure");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn real_errors_pass_through_unchanged() {
        let sim = Simulation::new(SimProfile::instant());
        let err = sim
            .call("test.op", async {
                Err::<(), _>(Error::NotFound("Job not found".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn roll_at_the_rate_boundary_does_not_fail() {
        let mut random = MockRandomSource::new();
        random.expect_failure_roll().return_const(0.08f64);
        let sim = Simulation::with_random(
            SimProfile {
                failure_rate: 0.08,
                ..SimProfile::instant()
            },
            Arc::new(random),
        );
        assert!(sim.call("test.op", async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn roll_below_the_rate_fails() {
        let mut random = MockRandomSource::new();
        random.expect_failure_roll().return_const(0.0799f64);
        let sim = Simulation::with_random(
            SimProfile {
                failure_rate: 0.08,
                ..SimProfile::instant()
            },
            Arc::new(random),
        );
        assert!(sim.call("test.op", async { Ok(()) }).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_lands_inside_the_window() {
        let mut random = MockRandomSource::new();
        random.expect_latency_fraction().return_const(0.5f64);
        random.expect_failure_roll().return_const(0.99f64);
        let sim = Simulation::with_random(SimProfile::default(), Arc::new(random));

        let started = tokio::time::Instant::now();
        sim.call("test.op", async { Ok(()) }).await.unwrap();

        // 200ms floor plus half of the 1000ms window.
        assert_eq!(started.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test]
    async fn degenerate_window_skips_the_latency_draw() {
        // No latency_fraction expectation: a draw would panic the mock.
        let mut random = MockRandomSource::new();
        random.expect_failure_roll().return_const(0.99f64);
        let sim = Simulation::with_random(SimProfile::instant(), Arc::new(random));
        assert!(sim.call("test.op", async { Ok(()) }).await.is_ok());
    }
}
