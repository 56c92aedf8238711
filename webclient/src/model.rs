mod credential;
mod message;
mod submission;

pub use credential::*;
pub use message::*;
pub use submission::*;

use async_trait::async_trait;

use crate::error::*;

pub use reqwest::Url;

pub type UtcDateTime = chrono::DateTime<chrono::Utc>;

/// Where submission snapshots come from.
#[async_trait]
pub trait SubmissionSource {
    /// Lists the submissions of the authenticated user for `competition`.
    /// Malformed records are skipped, so their ids keep the cached status.
    async fn list_submissions(&self, competition: &str) -> Result<Vec<Submission>>;
}

/// Where formatted notifications go.
#[async_trait]
pub trait Notifier {
    async fn deliver(&self, msg: &Message) -> Result<()>;
}

