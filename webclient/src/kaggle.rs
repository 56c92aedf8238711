pub mod client;
pub mod urls;
mod wire;

pub use client::*;
pub use urls::*;
