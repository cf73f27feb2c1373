//! Bluesky client over the AT Protocol XRPC endpoints.
//!
//! Login uses `com.atproto.server.createSession`; posting writes an
//! `app.bsky.feed.post` record with `com.atproto.repo.createRecord`.

use super::{PostReceipt, Publisher, Session};
use crate::error::SocialError;
use crate::utils::failure_detail;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

const CREATE_SESSION: &str = "xrpc/com.atproto.server.createSession";
const CREATE_RECORD: &str = "xrpc/com.atproto.repo.createRecord";
const POST_COLLECTION: &str = "app.bsky.feed.post";

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    access_jwt: String,
    did: String,
    handle: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord<'a> {
    #[serde(rename = "$type")]
    record_type: &'static str,
    text: &'a str,
    created_at: String,
    langs: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct CreateRecordRequest<'a> {
    repo: &'a str,
    collection: &'static str,
    record: PostRecord<'a>,
}

#[derive(Debug, Deserialize)]
struct CreateRecordResponse {
    uri: String,
    cid: String,
}

/// Session tokens kept after a successful login.
#[derive(Debug, Clone)]
struct AuthSession {
    access_jwt: String,
    did: String,
}

/// Bluesky account client.
pub struct BlueskyClient {
    client: reqwest::Client,
    service_url: Url,
    session: Option<AuthSession>,
}

impl BlueskyClient {
    /// Creates a client for the given PDS / entryway URL.
    pub fn new(client: reqwest::Client, service_url: &str) -> Result<Self, SocialError> {
        let mut service_url = Url::parse(service_url)
            .map_err(|e| SocialError::InvalidUrl(format!("{}: {}", service_url, e)))?;
        if service_url.cannot_be_a_base() {
            return Err(SocialError::InvalidUrl(service_url.to_string()));
        }
        // Endpoint paths are joined relative to the service root.
        if !service_url.path().ends_with('/') {
            let path = format!("{}/", service_url.path());
            service_url.set_path(&path);
        }

        Ok(Self {
            client,
            service_url,
            session: None,
        })
    }

    fn endpoint(&self, method: &str) -> Result<Url, SocialError> {
        self.service_url
            .join(method)
            .map_err(|e| SocialError::InvalidUrl(e.to_string()))
    }

    /// Returns true once `login` has succeeded.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

#[async_trait]
impl Publisher for BlueskyClient {
    fn name(&self) -> &'static str {
        "Bluesky"
    }

    async fn login(&mut self, username: &str, password: &str) -> Result<Session, SocialError> {
        let url = self.endpoint(CREATE_SESSION)?;
        tracing::info!(username, "creating Bluesky session");

        let response = self
            .client
            .post(url)
            .json(&CreateSessionRequest {
                identifier: username,
                password,
            })
            .send()
            .await
            .map_err(|e| SocialError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SocialError::AuthFailed(failure_detail(response).await));
        }

        let body: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| SocialError::AuthFailed(format!("unexpected session response: {}", e)))?;

        let session = Session {
            account_id: body.did.clone(),
            handle: body.handle,
        };
        self.session = Some(AuthSession {
            access_jwt: body.access_jwt,
            did: body.did,
        });

        Ok(session)
    }

    async fn post(&self, text: &str) -> Result<PostReceipt, SocialError> {
        let session = self.session.as_ref().ok_or(SocialError::NotLoggedIn)?;
        let url = self.endpoint(CREATE_RECORD)?;

        let request = CreateRecordRequest {
            repo: &session.did,
            collection: POST_COLLECTION,
            record: PostRecord {
                record_type: POST_COLLECTION,
                text,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                langs: ["en"],
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&session.access_jwt)
            .json(&request)
            .send()
            .await
            .map_err(|e| SocialError::PostFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SocialError::PostFailed(failure_detail(response).await));
        }

        let body: CreateRecordResponse = response
            .json()
            .await
            .map_err(|e| SocialError::PostFailed(format!("unexpected record response: {}", e)))?;

        tracing::info!(uri = %body.uri, "post created");

        Ok(PostReceipt {
            uri: body.uri,
            cid: body.cid,
        })
    }
}
