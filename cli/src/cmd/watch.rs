use anyhow::Context as _;
use kwatch_core::{action, PollerConfig};

use super::{ArgFirstSeen, GlobalArgs, SubcmdResult};
use crate::{config::GlobalConfig, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Competition slug (e.g. 'jigsaw-agile-community-rules')
    #[arg(short, long)]
    pub competition: String,

    /// Slack incoming webhook URL
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook: Option<String>,

    /// Polling interval in minutes [default: 10]
    #[arg(short, long, env = "INTERVAL_MIN", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_min: Option<u64>,

    /// What to do with a submission seen for the first time [default: silent]
    #[arg(long, value_enum)]
    pub first_seen: Option<ArgFirstSeen>,

    /// Do not post "watcher started" / "watcher stopped" messages
    #[arg(long)]
    pub no_lifecycle_messages: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let global_cfg = GlobalConfig::from_file_and_args(global_args)?;
    let cfg = &global_cfg.file;

    let webhook = args
        .slack_webhook
        .clone()
        .or_else(|| cfg.slack_webhook.clone())
        .with_context(|| {
            format!(
                "Slack webhook URL is required: use '--slack-webhook', \
                 $SLACK_WEBHOOK_URL, or 'slack_webhook' in {:?}",
                util::replace_homedir_to_tilde(&global_cfg.path)
            )
        })?;

    let request_timeout = cfg.request_timeout()?;
    let mut poller_cfg =
        PollerConfig::from_config(cfg, args.interval_min, args.first_seen.map(Into::into))?;
    if args.no_lifecycle_messages {
        poller_cfg.lifecycle_messages = false;
    }

    action::watch(
        &args.competition,
        &webhook,
        request_timeout,
        poller_cfg,
    )
    .await
}
