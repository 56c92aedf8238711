use std::fmt;

use serde::{Deserialize, Serialize};

use super::UtcDateTime;

/// Provider-assigned submission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionRef(pub u64);

impl fmt::Display for SubmissionRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    Pending,
    Running,
    Complete,
    Error,
    /// Provider-defined status this crate does not know about (normalized to lowercase).
    Other(String),
}

impl SubmissionStatus {
    /// Normalizes a raw provider status.
    /// e.g. `"SubmissionStatus.COMPLETE"` => `Complete`, `"uploading"` => `Pending`
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        let s = s.strip_prefix("submissionstatus.").unwrap_or(&s);

        use SubmissionStatus::*;
        match s {
            "complete" | "completed" => Complete,
            "pending" | "uploading" | "queued" => Pending,
            "running" => Running,
            "error" | "failed" => Error,
            other => Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        use SubmissionStatus::*;
        match self {
            Pending => "pending",
            Running => "running",
            Complete => "complete",
            Error => "error",
            Other(s) => s,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the submission list, as of a single fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: SubmissionRef,
    pub status: SubmissionStatus,
    pub public_score: Option<f64>,
    /// Populated only after the competition deadline (or provider release).
    pub private_score: Option<f64>,
    /// e.g. "submission.csv"
    pub file_name: Option<String>,
    pub description: Option<String>,
    pub submitted_at: Option<UtcDateTime>,
    /// Path on the provider site, e.g. "/submissions/34567890/34567890.raw"
    pub url: Option<String>,
    pub error_description: Option<String>,
}

impl Submission {
    pub fn new(id: u64, status: SubmissionStatus) -> Self {
        Self {
            id: SubmissionRef(id),
            status,
            public_score: None,
            private_score: None,
            file_name: None,
            description: None,
            submitted_at: None,
            url: None,
            error_description: None,
        }
    }

    pub fn with_scores(mut self, public: Option<f64>, private: Option<f64>) -> Self {
        self.public_score = public;
        self.private_score = private;
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_submitted_at(mut self, t: UtcDateTime) -> Self {
        self.submitted_at = Some(t);
        self
    }
}

/// Parses a score cell. Blank and placeholder values (`-`, `—`, `None`) are absent.
pub fn parse_score(s: &str) -> Option<f64> {
    match s.trim() {
        "" | "-" | "—" | "None" | "null" => None,
        s => s.parse().ok(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_status_normalizes_provider_values() {
        use SubmissionStatus::*;
        assert_eq!(SubmissionStatus::parse("complete"), Complete);
        assert_eq!(SubmissionStatus::parse("COMPLETED"), Complete);
        assert_eq!(SubmissionStatus::parse("SubmissionStatus.COMPLETE"), Complete);
        assert_eq!(SubmissionStatus::parse("uploading"), Pending);
        assert_eq!(SubmissionStatus::parse(" pending "), Pending);
        assert_eq!(SubmissionStatus::parse("queued"), Pending);
        assert_eq!(SubmissionStatus::parse("running"), Running);
        assert_eq!(SubmissionStatus::parse("SubmissionStatus.ERROR"), Error);
        assert_eq!(
            SubmissionStatus::parse("Rescoring"),
            Other("rescoring".to_owned())
        );
    }

    #[test]
    fn status_display_is_lowercase_name() {
        assert_eq!(SubmissionStatus::Complete.to_string(), "complete");
        assert_eq!(SubmissionStatus::Other("frozen".into()).to_string(), "frozen");
    }

    #[test]
    fn parse_score_ok() {
        assert_eq!(parse_score("0.91230"), Some(0.9123));
        assert_eq!(parse_score(" 12 "), Some(12.0));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("-"), None);
        assert_eq!(parse_score("—"), None);
        assert_eq!(parse_score("None"), None);
        assert_eq!(parse_score("n/a"), None);
    }
}
