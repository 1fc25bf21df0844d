// Scan loop for devflow-check
// Tests every configured client ID in order, one request at a time

use crate::config::ScanConfig;
use crate::engine::Probe;
use crate::models::{Outcome, ScanReport, ScanResult};
use crate::target::ScanTarget;
use crate::verdict::classify;
use tracing::{info, warn};

/// Progress notifications emitted while a scan runs.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// About to send the request for `client_id` (`index` is 1-based).
    Testing {
        index: usize,
        total: usize,
        client_id: &'a str,
    },
    /// `client_id` has been classified.
    Tested {
        client_id: &'a str,
        outcome: &'a Outcome,
    },
}

type ProgressFn = dyn Fn(&ScanEvent<'_>) + Send + Sync;

pub struct Scanner<P> {
    probe: P,
    config: ScanConfig,
    progress: Option<Box<ProgressFn>>,
}

impl<P: Probe> Scanner<P> {
    pub fn new(probe: P, config: ScanConfig) -> Self {
        Self {
            probe,
            config,
            progress: None,
        }
    }

    /// Report each candidate to `progress` as it is tested. Silent otherwise.
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(&ScanEvent<'_>) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(progress));
        self
    }

    fn emit(&self, event: ScanEvent<'_>) {
        if let Some(progress) = &self.progress {
            progress(&event);
        }
    }

    /// Probe every candidate sequentially and collect the outcomes.
    ///
    /// Per-candidate failures are recorded, never returned: one bad
    /// response does not stop the remaining candidates.
    pub async fn run(&self, target: &ScanTarget) -> ScanReport {
        let total = self.config.client_ids.len();
        let mut results = Vec::with_capacity(total);

        for (idx, client_id) in self.config.client_ids.iter().enumerate() {
            if idx > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            self.emit(ScanEvent::Testing {
                index: idx + 1,
                total,
                client_id,
            });

            let outcome = classify(self.probe.probe(target, client_id).await);
            match &outcome {
                Outcome::Vulnerable(_) => info!(client_id = %client_id, "user_code issued"),
                Outcome::Unclassified(_) => info!(client_id = %client_id, "no user_code in response"),
                Outcome::InvalidResponse(failure) | Outcome::NoResponse(failure) => {
                    warn!(client_id = %client_id, error = %failure, "probe failed")
                }
            }

            self.emit(ScanEvent::Tested {
                client_id,
                outcome: &outcome,
            });
            results.push(ScanResult::new(client_id.clone(), outcome));
        }

        ScanReport::new(target.base_url(), results)
    }
}
