//! Client for the Firestore emulator's REST surface.
//!
//! Shapes follow the familiar test-SDK flow:
//! `TestApp::initialize(options, host)?.firestore().collection("bill").doc("testDoc").get()`.

use crate::core::values::decode_fields;
use crate::domain::model::{AppOptions, DocumentRef, DocumentSnapshot};
use crate::domain::ports::DocumentStore;
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::emulator_base_url;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug)]
struct AppInner {
    options: AppOptions,
    base_url: Url,
    client: Client,
    token: Option<String>,
}

/// Handle to one emulator-backed project. Cloning shares the HTTP client.
#[derive(Debug, Clone)]
pub struct TestApp {
    inner: Arc<AppInner>,
}

impl TestApp {
    /// Builds the app handle. Only the emulator host is checked here; the
    /// project id goes to the emulator as-is.
    pub fn initialize(options: AppOptions, emulator_host: &str) -> Result<Self> {
        let base_url = emulator_base_url("emulator_host", emulator_host)?;
        let token = options
            .auth
            .as_ref()
            .map(|auth| unsigned_token(&options.project_id, &auth.uid))
            .transpose()?;

        tracing::debug!(
            "Initialized test app for project '{}' against {}",
            options.project_id,
            base_url
        );

        Ok(Self {
            inner: Arc::new(AppInner {
                options,
                base_url,
                client: Client::new(),
                token,
            }),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.inner.options.project_id
    }

    pub fn firestore(&self) -> Firestore {
        Firestore { app: self.clone() }
    }

    /// Wipes every document in the project's default database.
    pub async fn clear_firestore_data(&self) -> Result<()> {
        let url = self.endpoint(&[
            "emulator",
            "v1",
            "projects",
            self.project_id(),
            "databases",
            DEFAULT_DATABASE,
            "documents",
        ])?;

        tracing::debug!("Clearing emulator data: DELETE {}", url);
        let response = self.inner.client.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(emulator_error(status, &body));
        }
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CheckError::ConfigError {
                message: format!("emulator URL cannot be a base: {}", self.inner.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn document_url(&self, doc: &DocumentRef) -> Result<Url> {
        self.endpoint(&[
            "v1",
            "projects",
            self.project_id(),
            "databases",
            DEFAULT_DATABASE,
            "documents",
            doc.collection.as_str(),
            doc.id.as_str(),
        ])
    }

    async fn fetch(&self, doc: &DocumentRef) -> Result<DocumentSnapshot> {
        let url = self.document_url(doc)?;
        tracing::debug!("Reading document: GET {}", url);

        let mut request = self.inner.client.get(url);
        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Emulator response status: {}", status);

        let body = response.text().await?;
        if status == StatusCode::NOT_FOUND && is_not_found_envelope(&body) {
            return Ok(DocumentSnapshot::missing(doc.clone()));
        }
        if !status.is_success() {
            return Err(emulator_error(status, &body));
        }

        // any 2xx is a resolved read; the body shape never fails it
        let raw = serde_json::from_str::<RawDocument>(&body).unwrap_or_else(|e| {
            tracing::warn!("Unparseable document body for {}: {}", doc, e);
            RawDocument::default()
        });

        Ok(DocumentSnapshot {
            reference: doc.clone(),
            exists: true,
            name: raw.name,
            fields: Some(raw.fields.as_ref().map(decode_fields).unwrap_or_default()),
            create_time: raw.create_time.as_deref().and_then(parse_timestamp),
            update_time: raw.update_time.as_deref().and_then(parse_timestamp),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Firestore {
    app: TestApp,
}

impl Firestore {
    pub fn app(&self) -> &TestApp {
        &self.app
    }

    pub fn collection(&self, name: impl Into<String>) -> CollectionRef {
        CollectionRef {
            db: self.clone(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for Firestore {
    async fn get(&self, doc: &DocumentRef) -> Result<DocumentSnapshot> {
        self.app.fetch(doc).await
    }
}

#[derive(Debug, Clone)]
pub struct CollectionRef {
    db: Firestore,
    name: String,
}

impl CollectionRef {
    pub fn doc(&self, id: impl Into<String>) -> DocumentHandle {
        DocumentHandle {
            db: self.db.clone(),
            reference: DocumentRef::new(self.name.clone(), id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentHandle {
    db: Firestore,
    reference: DocumentRef,
}

impl DocumentHandle {
    pub fn reference(&self) -> &DocumentRef {
        &self.reference
    }

    pub async fn get(&self) -> Result<DocumentSnapshot> {
        self.db.get(&self.reference).await
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    name: Option<String>,
    fields: Option<serde_json::Map<String, serde_json::Value>>,
    create_time: Option<String>,
    update_time: Option<String>,
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

/// Only the emulator's own `NOT_FOUND` envelope means "no such document";
/// a bare 404 from some other server is a failure.
fn is_not_found_envelope(body: &str) -> bool {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.status.as_deref() == Some("NOT_FOUND"))
        .unwrap_or(false)
}

fn emulator_error(status: StatusCode, body: &str) -> CheckError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    CheckError::Emulator {
        status: status.as_u16(),
        message,
    }
}

/// Unsigned (`alg: none`) ID token; the emulator accepts it without verification.
pub fn unsigned_token(project_id: &str, uid: &str) -> Result<String> {
    let iat = Utc::now().timestamp();
    let header = serde_json::json!({ "alg": "none", "kid": "fakekid", "typ": "JWT" });
    let claims = serde_json::json!({
        "iss": format!("https://securetoken.google.com/{}", project_id),
        "aud": project_id,
        "iat": iat,
        "exp": iat + 3600,
        "auth_time": iat,
        "sub": uid,
        "user_id": uid,
        "firebase": { "sign_in_provider": "custom", "identities": {} },
    });

    Ok(format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
    ))
}
