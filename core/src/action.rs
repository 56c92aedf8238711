use std::time::Duration;

use colored::Colorize;
use kwatch_webclient::{
    kaggle::validate_competition_slug, KaggleClient, KaggleCredential, SlackWebhook, Submission,
    SubmissionSource,
};

use crate::error::*;
use crate::poller::{Poller, PollerConfig};
use crate::style;

/// Builds an authenticated Kaggle client. Missing credentials are fatal.
pub fn kaggle_client(timeout: Duration) -> Result<KaggleClient> {
    let cred = KaggleCredential::load().context("Failed to load Kaggle credential")?;
    log::info!("Kaggle user: {}", cred.username);
    KaggleClient::new(cred, timeout).context("Failed to build HTTP client")
}

pub fn slack_webhook(webhook_url: &str, timeout: Duration) -> Result<SlackWebhook> {
    ensure!(!webhook_url.trim().is_empty(), "Slack webhook URL is empty");
    SlackWebhook::new(webhook_url, timeout).context("Invalid Slack webhook URL")
}

/// Resolves on Ctrl-C, or on SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => (),
        _ = terminate => (),
    }
}

/// Watches `competition` until interrupted.
pub async fn watch(
    competition: &str,
    webhook_url: &str,
    request_timeout: Duration,
    cfg: PollerConfig,
) -> Result<()> {
    validate_competition_slug(competition)?;

    let source = self::kaggle_client(request_timeout)?;
    let notifier = self::slack_webhook(webhook_url, request_timeout)?;

    log::info!(
        "Watching '{}' every {} min (first-seen policy: {}), notifying {}",
        competition,
        cfg.interval.as_secs() / 60,
        cfg.first_seen,
        notifier.display_target(),
    );

    Poller::new(competition, source, notifier, cfg)
        .run_until(self::shutdown_signal())
        .await
}

pub async fn list_submissions(
    competition: &str,
    request_timeout: Duration,
) -> Result<Vec<Submission>> {
    validate_competition_slug(competition)?;
    let cli = self::kaggle_client(request_timeout)?;
    cli.list_submissions(competition)
        .await
        .with_context(|| format!("Failed to fetch submissions of '{}'", competition))
}

pub fn print_submissions(subs: &[Submission]) {
    if subs.is_empty() {
        println!("{}", "No submissions.".dimmed());
        return;
    }
    for s in subs {
        let submitted = s
            .submitted_at
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|| "-".to_owned());
        let score = |x: Option<f64>| x.map_or("-".to_owned(), |x| x.to_string());
        println!(
            "{:>10}  {}  {}  public={:<10} private={:<10} {}",
            s.id.to_string().cyan(),
            style::status_label(&s.status),
            submitted,
            score(s.public_score),
            score(s.private_score),
            s.file_name.as_deref().unwrap_or("").bright_black(),
        );
    }
}
