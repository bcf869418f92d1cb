use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Address of one document: `(collection, id)`. Both parts are opaque and
/// passed to the emulator untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Result of a document read. A missing document is still a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub reference: DocumentRef,
    pub exists: bool,
    pub name: Option<String>,
    pub fields: Option<serde_json::Map<String, serde_json::Value>>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl DocumentSnapshot {
    pub fn missing(reference: DocumentRef) -> Self {
        Self {
            reference,
            exists: false,
            name: None,
            fields: None,
            create_time: None,
            update_time: None,
        }
    }

    pub fn data(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.fields.as_ref()
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.as_ref().and_then(|f| f.get(field))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOptions {
    pub project_id: String,
    pub auth: Option<AuthClaims>,
}

impl AppOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            auth: None,
        }
    }

    pub fn with_auth(mut self, uid: impl Into<String>) -> Self {
        self.auth = Some(AuthClaims { uid: uid.into() });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pending,
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckOutcome {
    Passed,
    Failed { reason: String },
}

impl CheckOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub fn state(&self) -> CheckState {
        match self {
            Self::Passed => CheckState::Passed,
            Self::Failed { .. } => CheckState::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_passed())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.outcome.is_passed())
    }

    pub fn passing_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            match &result.outcome {
                CheckOutcome::Passed => {
                    writeln!(f, "  ✓ {} ({}ms)", result.name, result.elapsed.as_millis())?
                }
                CheckOutcome::Failed { reason } => {
                    writeln!(f, "  ✗ {}: {}", result.name, reason)?
                }
            }
        }
        let failing = self.results.len() - self.passing_count();
        writeln!(f)?;
        write!(f, "  {} passing", self.passing_count())?;
        if failing > 0 {
            write!(f, "\n  {} failing", failing)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_path() {
        let doc = DocumentRef::new("bill", "testDoc");
        assert_eq!(doc.path(), "bill/testDoc");
        assert_eq!(doc.to_string(), "bill/testDoc");
    }

    #[test]
    fn test_report_summary() {
        let report = SuiteReport {
            results: vec![
                CheckResult {
                    name: "a".to_string(),
                    outcome: CheckOutcome::Passed,
                    elapsed: Duration::from_millis(1),
                },
                CheckResult {
                    name: "b".to_string(),
                    outcome: CheckOutcome::failed("boom"),
                    elapsed: Duration::from_millis(3),
                },
            ],
        };

        assert!(!report.passed());
        assert_eq!(report.failures().count(), 1);
        let text = report.to_string();
        assert!(text.contains("1 passing"));
        assert!(text.contains("1 failing"));
        assert!(text.contains("b: boom"));
    }
}
