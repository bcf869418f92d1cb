use crate::domain::model::{CheckOutcome, CheckState, DocumentRef};
use crate::domain::ports::DocumentStore;
use crate::utils::error::CheckError;
use std::fmt::Debug;
use tokio::sync::oneshot;

/// Sender half of a check's completion signal. `done` consumes it, so a
/// check can complete at most once.
#[derive(Debug)]
pub struct Done {
    tx: oneshot::Sender<Option<CheckError>>,
}

impl Done {
    pub fn done(self) {
        let _ = self.tx.send(None);
    }

    pub fn fail(self, error: CheckError) {
        let _ = self.tx.send(Some(error));
    }
}

/// Receiver half. Resolves once the paired `Done` fires or is dropped; the
/// first resolution is terminal.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<Option<CheckError>>,
    outcome: Option<CheckOutcome>,
}

impl Completion {
    pub fn channel() -> (Done, Self) {
        let (tx, rx) = oneshot::channel();
        (
            Done { tx },
            Self {
                rx,
                outcome: None,
            },
        )
    }

    pub fn state(&self) -> CheckState {
        self.outcome
            .as_ref()
            .map_or(CheckState::Pending, CheckOutcome::state)
    }

    pub async fn wait(&mut self) -> CheckOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let outcome = match (&mut self.rx).await {
            Ok(None) => CheckOutcome::Passed,
            Ok(Some(error)) => CheckOutcome::failed(error.diagnostic()),
            Err(_) => CheckOutcome::failed("check finished without signalling completion"),
        };
        self.outcome = Some(outcome.clone());
        outcome
    }
}

/// Equality assertion reporting both operands on mismatch.
pub fn ensure_eq<T: PartialEq + Debug>(actual: T, expected: T) -> CheckOutcome {
    if actual == expected {
        CheckOutcome::Passed
    } else {
        CheckOutcome::failed(format!(
            "expected {:?} to equal {:?}",
            actual, expected
        ))
    }
}

pub fn arithmetic_check() -> CheckOutcome {
    ensure_eq(2 + 2, 4)
}

/// Passes when the read resolves, whether or not the document exists.
/// Contents are not inspected.
pub async fn remote_read_check<S: DocumentStore + ?Sized>(
    store: &S,
    doc: &DocumentRef,
) -> CheckOutcome {
    let (done, mut completion) = Completion::channel();

    match store.get(doc).await {
        Ok(snapshot) => {
            tracing::debug!("Read {} resolved (exists: {})", doc, snapshot.exists);
            done.done();
        }
        Err(error) => {
            tracing::warn!("Read {} rejected: {}", doc, error);
            done.fail(error);
        }
    }

    completion.wait().await
}
