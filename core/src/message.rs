use std::time::Duration;

use chrono::Local;
use kwatch_webclient::{
    kaggle::{competition_submissions_page_url, submission_page_url},
    Message, Submission, SubmissionStatus, UtcDateTime,
};
use serde_json::json;

use crate::tracker::StatusChange;

const TIME_FMT: &str = "%Y-%m-%d %H:%M:%S (UTC%:z)";

pub fn watcher_started(competition: &str, interval: Duration) -> Message {
    Message::text(format!(
        ":rocket: Watcher started: *{}* (every {} min)\nSubmissions: {}",
        competition,
        interval.as_secs() / 60,
        competition_submissions_page_url(competition),
    ))
}

pub fn watcher_stopped(competition: &str) -> Message {
    Message::text(format!(":wave: Watcher stopped: *{}*", competition))
}

pub fn status_emoji(status: &SubmissionStatus) -> &'static str {
    use SubmissionStatus::*;
    match status {
        Pending | Running => ":hourglass_flowing_sand:",
        Complete => ":white_check_mark:",
        Error => ":x:",
        Other(_) => ":information_source:",
    }
}

/// Whole minutes between two instants, at least 1.
pub fn elapsed_minutes(from: UtcDateTime, to: UtcDateTime) -> i64 {
    (to - from).num_minutes().max(1)
}

/// e.g. `Public LB: *0.78* / Private LB: *0.77*`
pub fn score_line(sub: &Submission) -> String {
    match (sub.public_score, sub.private_score) {
        (Some(public), Some(private)) => {
            format!("Public LB: *{}* / Private LB: *{}*", public, private)
        }
        (Some(public), None) => format!("Public LB: *{}*", public),
        (None, Some(private)) => format!("Private LB: *{}*", private),
        (None, None) => "Public LB: (N/A)".to_owned(),
    }
}

fn has_score(sub: &Submission) -> bool {
    sub.public_score.is_some() || sub.private_score.is_some()
}

fn transition(change: &StatusChange) -> String {
    match &change.previous {
        Some(prev) => format!("`{}` → *{}*", prev, change.current()),
        None => format!("(new) → *{}*", change.current()),
    }
}

fn subject(sub: &Submission) -> String {
    match &sub.file_name {
        Some(name) => format!("`{}` ({})", sub.id, name),
        None => format!("`{}`", sub.id),
    }
}

/// Formats one status transition for the chat sink.
pub fn status_change(competition: &str, change: &StatusChange, now: UtcDateTime) -> Message {
    let sub = &change.submission;
    let link = submission_page_url(sub.url.as_deref(), competition);
    let elapsed = sub.submitted_at.map(|t| elapsed_minutes(t, now));

    if *change.current() == SubmissionStatus::Complete {
        return self::complete(competition, change, &link, elapsed);
    }

    let mut text = format!(
        "{} *{}* {}: {}",
        status_emoji(change.current()),
        competition,
        subject(sub),
        transition(change),
    );
    if let Some(min) = elapsed {
        text += &format!(" / Elapsed {} min", min);
    }
    if let Some(desc) = &sub.description {
        text += &format!("\n> {}", desc);
    }
    if has_score(sub) {
        text += &format!("\n{}", score_line(sub));
    }
    if *change.current() == SubmissionStatus::Error {
        let detail = sub.error_description.as_deref().unwrap_or("(no detail)");
        text += &format!("\n```{}```", detail);
    }
    text += &format!("\n<{}|Open submission>", link);
    Message::text(text)
}

fn complete(competition: &str, change: &StatusChange, link: &str, elapsed: Option<i64>) -> Message {
    let sub = &change.submission;

    let mut fields = vec![
        json!({ "type": "mrkdwn", "text": format!("*Competition:*\n{}", competition) }),
        json!({ "type": "mrkdwn", "text": format!("*Ref:*\n{}", subject(sub)) }),
        json!({ "type": "mrkdwn", "text": format!("*Status:*\n{}", transition(change)) }),
    ];
    if let Some(min) = elapsed {
        let text = format!("*Elapsed (Submit→Now):*\n{} min", min);
        fields.push(json!({ "type": "mrkdwn", "text": text }));
    }
    if let Some(t) = sub.submitted_at {
        let local = t.with_timezone(&Local).format(TIME_FMT);
        fields.push(json!({ "type": "mrkdwn", "text": format!("*Submitted:*\n{}", local) }));
    }
    if let Some(desc) = &sub.description {
        fields.push(json!({ "type": "mrkdwn", "text": format!("*Description:*\n{}", desc) }));
    }

    let blocks = vec![
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": ":white_check_mark: *Kaggle Submission Complete*" },
        }),
        json!({ "type": "section", "fields": fields }),
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": score_line(sub) },
        }),
        json!({
            "type": "context",
            "elements": [{ "type": "mrkdwn", "text": format!("<{}|Open submission>", link) }],
        }),
    ];

    let text = format!(
        "{} Submission complete: *{}* {}: {} / {}",
        status_emoji(change.current()),
        competition,
        subject(sub),
        transition(change),
        score_line(sub),
    );
    Message::text(text).with_blocks(blocks)
}
