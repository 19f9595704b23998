//! Registry Sweeper - Periodic removal of expired call entries

use chrono::Utc;
use std::time::Duration;
use tokio::time::interval;

use crate::application::CallRegistry;

/// Sweeper configuration
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Interval between sweeps
    pub interval: Duration,
    /// Enable/disable sweeper
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            enabled: true,
        }
    }
}

pub struct RegistrySweeper {
    registry: CallRegistry,
    config: SweeperConfig,
}

impl RegistrySweeper {
    pub fn new(registry: CallRegistry, config: Option<SweeperConfig>) -> Self {
        Self {
            registry,
            config: config.unwrap_or_default(),
        }
    }

    /// Start the sweeper (runs in background)
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(self) {
        if !self.config.enabled || self.config.interval.is_zero() {
            tracing::info!("Registry sweeper disabled");
            return;
        }

        tracing::info!(
            "Registry sweeper started (interval: {:?})",
            self.config.interval
        );

        let mut ticker = interval(self.config.interval);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = self.registry.sweep_expired(Utc::now());
            if removed > 0 {
                tracing::info!(
                    removed,
                    remaining = self.registry.len(),
                    "Expired call entries removed"
                );
            }
        }
    }
}
