//! Social network publishing.
//!
//! The [`Publisher`] trait is the seam between the pipeline and a concrete
//! network client; [`BlueskyClient`] is the only implementation shipped.

mod bluesky;

pub use bluesky::BlueskyClient;

use crate::error::SocialError;
use async_trait::async_trait;

/// Authenticated account details returned by a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable account identifier (a DID on Bluesky).
    pub account_id: String,

    /// Human-readable handle.
    pub handle: String,
}

/// Reference to a published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReceipt {
    pub uri: String,
    pub cid: String,
}

/// A social network account that text posts can be published to.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Returns the human-readable name of the network.
    fn name(&self) -> &'static str;

    /// Establishes an authenticated session.
    async fn login(&mut self, username: &str, password: &str) -> Result<Session, SocialError>;

    /// Publishes `text` as a new post using the current session.
    async fn post(&self, text: &str) -> Result<PostReceipt, SocialError>;
}
