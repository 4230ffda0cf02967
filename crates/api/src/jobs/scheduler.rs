//! Interval scheduler for background jobs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// A task run on a fixed period.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Time between runs. The first run happens one period after start.
    fn period(&self) -> Duration;

    async fn run(&self) -> Result<(), String>;
}

/// Runs registered jobs on their periods until shut down.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Spawns one task per registered job.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting background jobs");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let mut shutdown_rx = self.shutdown_tx.subscribe();

            self.handles.push(tokio::spawn(async move {
                let name = job.name();
                let mut interval = tokio::time::interval(job.period());
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let start = Instant::now();
                            match job.run().await {
                                Ok(()) => debug!(
                                    job = name,
                                    elapsed_ms = start.elapsed().as_millis() as u64,
                                    "Job completed"
                                ),
                                Err(e) => warn!(
                                    job = name,
                                    elapsed_ms = start.elapsed().as_millis() as u64,
                                    error = %e,
                                    "Job failed"
                                ),
                            }
                        }
                        changed = shutdown_rx.changed() => {
                            if changed.is_err() || *shutdown_rx.borrow() {
                                debug!(job = name, "Job stopped");
                                break;
                            }
                        }
                    }
                }
            }));
        }
    }

    /// Signals every job to stop and waits up to `timeout` for them.
    pub async fn shutdown(self, timeout: Duration) {
        let _ = self.shutdown_tx.send(true);

        let wait = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        if tokio::time::timeout(timeout, wait).await.is_err() {
            warn!(?timeout, "Background jobs did not stop in time");
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingJob {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn period(&self) -> Duration {
            Duration::from_millis(20)
        }

        async fn run(&self) -> Result<(), String> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_register() {
        let mut scheduler = JobScheduler::default();
        scheduler.register(CountingJob {
            runs: Arc::new(AtomicUsize::new(0)),
        });
        assert_eq!(scheduler.jobs.len(), 1);
        assert!(scheduler.handles.is_empty());
    }

    #[tokio::test]
    async fn test_jobs_run_until_shutdown() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(CountingJob {
            runs: Arc::clone(&runs),
        });
        scheduler.start();

        tokio::time::sleep(Duration::from_millis(150)).await;
        scheduler.shutdown(Duration::from_secs(2)).await;

        let after_shutdown = runs.load(Ordering::SeqCst);
        assert!(after_shutdown >= 1);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(runs.load(Ordering::SeqCst), after_shutdown);
    }
}
