pub mod list;
pub mod watch;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Config file path (default: <config dir>/kwatch-cli/kwatch.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    #[command(alias("w"))]
    Watch(watch::Args),

    #[command(alias("ls"))]
    List(list::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Watch(args) => watch::exec(args, self).await,
            List(args) => list::exec(args, self).await,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum ArgFirstSeen {
    Silent,
    AfterBaseline,
    Unfinished,
}

impl From<ArgFirstSeen> for kwatch_core::FirstSeenPolicy {
    fn from(value: ArgFirstSeen) -> Self {
        use kwatch_core::FirstSeenPolicy;
        use ArgFirstSeen::*;
        match value {
            Silent => FirstSeenPolicy::Silent,
            AfterBaseline => FirstSeenPolicy::AfterBaseline,
            Unfinished => FirstSeenPolicy::Unfinished,
        }
    }
}
