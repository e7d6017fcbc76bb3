//! Configuration section definitions.

mod download;
mod optimize;
mod paths;

pub use download::DownloadConfig;
pub use optimize::{Engine, OptimizeConfig};
pub use paths::PathsConfig;
