use crate::core::checks::{arithmetic_check, remote_read_check};
use crate::core::testing::TestApp;
use crate::domain::model::{AppOptions, CheckOutcome, CheckResult, DocumentRef, SuiteReport};
use crate::domain::ports::{ConfigProvider, DocumentStore};
use crate::utils::error::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

pub const ARITHMETIC_CHECK: &str = "Understands basic addition";
pub const READ_CHECK: &str = "Can read from the database";

pub type CheckFuture = Pin<Box<dyn Future<Output = CheckOutcome> + Send>>;

struct Check {
    name: String,
    run: Box<dyn Fn() -> CheckFuture + Send + Sync>,
}

/// Ordered set of independent checks. Each runs on its own task, bounded by
/// the runner timeout; a failure, panic or timeout in one never touches
/// the others.
pub struct Suite {
    name: String,
    checks: Vec<Check>,
    timeout: Duration,
}

impl Suite {
    pub fn new(name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
            timeout,
        }
    }

    /// The two standard checks: arithmetic and one emulator read.
    pub fn standard<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut options = AppOptions::new(config.project_id());
        if let Some(uid) = config.auth_uid() {
            options = options.with_auth(uid);
        }
        let db = TestApp::initialize(options, config.emulator_host())?.firestore();

        Ok(Self::with_store(
            "Our app",
            config.timeout(),
            Arc::new(db),
            config.document(),
        ))
    }

    /// Like `standard`, but reads `doc` through the given store.
    pub fn with_store(
        name: impl Into<String>,
        timeout: Duration,
        store: Arc<dyn DocumentStore>,
        doc: DocumentRef,
    ) -> Self {
        Self::new(name, timeout)
            .check(ARITHMETIC_CHECK, || async { arithmetic_check() })
            .check(READ_CHECK, move || {
                let store = Arc::clone(&store);
                let doc = doc.clone();
                async move { remote_read_check(store.as_ref(), &doc).await }
            })
    }

    pub fn check<F, Fut>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CheckOutcome> + Send + 'static,
    {
        self.checks.push(Check {
            name: name.into(),
            run: Box::new(move || -> CheckFuture { Box::pin(run()) }),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub async fn run(&self) -> SuiteReport {
        tracing::info!("Running '{}' ({} checks)", self.name, self.checks.len());
        let mut report = SuiteReport::default();

        for check in &self.checks {
            let started = Instant::now();
            let span = tracing::info_span!("check", name = %check.name);
            let mut handle = tokio::spawn((check.run)().instrument(span));

            let outcome = match tokio::time::timeout(self.timeout, &mut handle).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(join_error)) => CheckOutcome::failed(format!("check aborted: {}", join_error)),
                Err(_) => {
                    handle.abort();
                    CheckOutcome::failed(format!(
                        "timed out after {}ms",
                        self.timeout.as_millis()
                    ))
                }
            };

            let elapsed = started.elapsed();
            match &outcome {
                CheckOutcome::Passed => {
                    tracing::info!("✅ {} ({}ms)", check.name, elapsed.as_millis())
                }
                CheckOutcome::Failed { reason } => {
                    tracing::error!("❌ {}: {}", check.name, reason)
                }
            }

            report.results.push(CheckResult {
                name: check.name.clone(),
                outcome,
                elapsed,
            });
        }

        report
    }
}
