pub mod action;
pub mod config;
pub mod message;
pub mod poller;
pub mod style;
pub mod tracker;

pub use crate::config::Config;
pub use crate::poller::{CycleReport, Poller, PollerConfig};
pub use crate::tracker::{FirstSeenPolicy, StatusChange, StatusTracker};

pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
