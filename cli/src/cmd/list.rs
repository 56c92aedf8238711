use kwatch_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::config::GlobalConfig;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Competition slug (e.g. 'titanic')
    #[arg(short, long)]
    pub competition: String,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args)?;
    let timeout = cfg.file.request_timeout()?;
    let subs = action::list_submissions(&args.competition, timeout).await?;
    print_success!("{} submission(s) in '{}'", subs.len(), args.competition);
    action::print_submissions(&subs);
    Ok(())
}
