// exported modules
pub mod error;
pub mod http;
pub mod model;

// collaborator impls
pub mod kaggle;
pub mod slack;

// re-exports
pub use error::*;
pub use kaggle::KaggleClient;
pub use model::*;
pub use slack::SlackWebhook;

// internal modules
mod util;
