//! JSON shape of `GET /competitions/submissions/list/{competition}`.

use chrono::{DateTime, NaiveDateTime, TimeZone as _, Utc};
use serde::{Deserialize, Deserializer};

use crate::model::{parse_score, Submission, SubmissionRef, SubmissionStatus, UtcDateTime};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawSubmission {
    #[serde(rename = "ref", default, deserialize_with = "number_or_string")]
    pub ref_: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub public_score: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub private_score: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

fn number_or_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<NumberOrString> = Option::deserialize(d)?;
    Ok(v.map(|v| match v {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    }))
}

/// Kaggle sometimes omits the offset (`2024-01-02T03:04:05.123`); such times are UTC.
pub(super) fn parse_datetime(s: &str) -> Option<UtcDateTime> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|t| Utc.from_utc_datetime(&t))
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !matches!(s.trim(), "" | "-" | "—"))
}

/// Extracts the numeric identifier, tolerating decorations like `"#12345"`.
pub(super) fn parse_ref(s: &str) -> Option<SubmissionRef> {
    if let Ok(n) = s.trim().parse() {
        return Some(SubmissionRef(n));
    }
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok().map(SubmissionRef)
}

impl RawSubmission {
    /// Returns `None` if the record has no usable identifier.
    pub fn into_submission(self) -> Option<Submission> {
        let id = self.ref_.as_deref().and_then(parse_ref)?;
        let status = SubmissionStatus::parse(self.status.as_deref().unwrap_or(""));
        Some(Submission {
            id,
            status,
            public_score: self.public_score.as_deref().and_then(parse_score),
            private_score: self.private_score.as_deref().and_then(parse_score),
            file_name: non_blank(self.file_name),
            description: non_blank(self.description),
            submitted_at: self.date.as_deref().and_then(parse_datetime),
            url: non_blank(self.url),
            error_description: non_blank(self.error_description),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"[
        {
            "ref": 34567890,
            "totalBytes": 1234,
            "date": "2024-03-01T12:34:56.789Z",
            "description": "lgbm baseline",
            "errorDescription": null,
            "fileName": "submission.csv",
            "publicScore": "0.78468",
            "privateScore": "",
            "status": "complete",
            "submittedBy": "alice",
            "teamName": "alice",
            "url": "/submissions/34567890/34567890.raw"
        },
        {
            "ref": "34567891",
            "date": "2024-03-01T13:00:00",
            "fileName": "submission.csv",
            "publicScore": null,
            "privateScore": null,
            "status": "SubmissionStatus.PENDING"
        },
        {
            "ref": 34567892,
            "status": "error",
            "errorDescription": "Submission must have 418 rows",
            "publicScore": 0.5
        }
    ]"#;

    #[test]
    fn decode_submission_list() {
        let raws: Vec<RawSubmission> = serde_json::from_str(SAMPLE).unwrap();
        let subs: Vec<_> = raws
            .into_iter()
            .filter_map(RawSubmission::into_submission)
            .collect();
        assert_eq!(subs.len(), 3);

        assert_eq!(subs[0].id, SubmissionRef(34567890));
        assert_eq!(subs[0].status, SubmissionStatus::Complete);
        assert_eq!(subs[0].public_score, Some(0.78468));
        assert_eq!(subs[0].private_score, None);
        assert_eq!(subs[0].file_name.as_deref(), Some("submission.csv"));
        assert_eq!(
            subs[0].url.as_deref(),
            Some("/submissions/34567890/34567890.raw")
        );
        assert_eq!(subs[0].error_description, None);

        assert_eq!(subs[1].id, SubmissionRef(34567891));
        assert_eq!(subs[1].status, SubmissionStatus::Pending);
        assert_eq!(
            subs[1].submitted_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap())
        );

        assert_eq!(subs[2].status, SubmissionStatus::Error);
        assert_eq!(subs[2].public_score, Some(0.5));
        assert_eq!(
            subs[2].error_description.as_deref(),
            Some("Submission must have 418 rows")
        );
        assert_eq!(subs[2].submitted_at, None);
    }

    #[test]
    fn record_without_usable_ref_is_dropped() {
        let raw: RawSubmission =
            serde_json::from_str(r#"{"ref": "", "status": "complete"}"#).unwrap();
        assert_eq!(raw.into_submission(), None);

        let raw: RawSubmission =
            serde_json::from_str(r#"{"ref": null, "status": "complete"}"#).unwrap();
        assert_eq!(raw.into_submission(), None);
    }

    #[test]
    fn parse_ref_tolerates_decorations() {
        assert_eq!(parse_ref("123"), Some(SubmissionRef(123)));
        assert_eq!(parse_ref("#123"), Some(SubmissionRef(123)));
        assert_eq!(parse_ref("abc"), None);
    }

    #[test]
    fn parse_datetime_ok() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 34, 56).unwrap();
        assert_eq!(parse_datetime("2024-03-01T12:34:56Z"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01T21:34:56+09:00"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01T12:34:56"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01 12:34:56"), Some(expected));
        assert_eq!(parse_datetime("yesterday"), None);
    }
}
