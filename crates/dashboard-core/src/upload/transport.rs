//! Where upload progress and outcomes come from
//!
//! The dialog only knows the three-state contract (uploading with progress,
//! success, error). [`SimulatedTransport`] fills it with random numbers; a
//! real transport reports bytes sent and the server's answer instead.

use contract_types::{UploadFile, UploadStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::UploadConfig;
use crate::error::Result;

pub trait UploadTransport {
    /// Percent points gained since the previous tick
    fn progress_increment(&mut self, file: &UploadFile) -> f64;

    /// Terminal status for a file that has reached 100%.
    /// Must be `Success` or `Error`.
    fn outcome(&mut self, file: &UploadFile) -> UploadStatus;
}

/// Random progress in `[0, max_increment)` per tick; success with
/// probability `success_rate` once a file completes
#[derive(Debug, Clone)]
pub struct SimulatedTransport<R = StdRng> {
    rng: R,
    max_increment: f64,
    success_rate: f64,
}

impl SimulatedTransport<StdRng> {
    pub fn from_entropy(config: &UploadConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible runs for tests and demos
    pub fn seeded(config: &UploadConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulatedTransport<R> {
    pub fn with_rng(config: &UploadConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng,
            max_increment: config.max_increment,
            success_rate: config.success_rate,
        })
    }
}

impl<R: Rng> UploadTransport for SimulatedTransport<R> {
    fn progress_increment(&mut self, _file: &UploadFile) -> f64 {
        self.rng.gen_range(0.0..self.max_increment)
    }

    fn outcome(&mut self, _file: &UploadFile) -> UploadStatus {
        if self.rng.gen_bool(self.success_rate) {
            UploadStatus::Success
        } else {
            UploadStatus::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> UploadFile {
        UploadFile::new("f1", "lease.pdf", 1024)
    }

    #[test]
    fn test_increments_stay_below_max() {
        let config = UploadConfig::default();
        let mut transport = SimulatedTransport::seeded(&config, 7).unwrap();

        for _ in 0..1_000 {
            let step = transport.progress_increment(&file());
            assert!((0.0..30.0).contains(&step), "step out of range: {}", step);
        }
    }

    #[test]
    fn test_certain_outcomes() {
        let always = UploadConfig {
            success_rate: 1.0,
            ..UploadConfig::default()
        };
        let never = UploadConfig {
            success_rate: 0.0,
            ..UploadConfig::default()
        };

        let mut ok = SimulatedTransport::seeded(&always, 1).unwrap();
        let mut failing = SimulatedTransport::seeded(&never, 1).unwrap();

        for _ in 0..50 {
            assert_eq!(ok.outcome(&file()), UploadStatus::Success);
            assert_eq!(failing.outcome(&file()), UploadStatus::Error);
        }
    }

    #[test]
    fn test_success_rate_roughly_respected() {
        let config = UploadConfig::default();
        let mut transport = SimulatedTransport::seeded(&config, 42).unwrap();

        let successes = (0..10_000)
            .filter(|_| transport.outcome(&file()) == UploadStatus::Success)
            .count();

        assert!(
            (7_500..8_500).contains(&successes),
            "expected about 8000 successes, got {}",
            successes
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = UploadConfig {
            max_increment: 0.0,
            ..UploadConfig::default()
        };
        assert!(SimulatedTransport::seeded(&config, 1).is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = UploadConfig::default();
        let mut a = SimulatedTransport::seeded(&config, 99).unwrap();
        let mut b = SimulatedTransport::seeded(&config, 99).unwrap();

        for _ in 0..20 {
            assert_eq!(a.progress_increment(&file()), b.progress_increment(&file()));
        }
    }
}
