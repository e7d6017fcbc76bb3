//! `[optimize]` section configuration.

use clap::ValueEnum;
use serde::Deserialize;

/// Encoding engine strategy, selected once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Re-encode with the built-in codecs (image + ravif).
    #[default]
    Builtin,
    /// Pass originals through byte-for-byte into the optimized tree.
    Copy,
}

/// Optimizer behavior.
///
/// # Example
///
/// ```toml
/// [optimize]
/// engine = "builtin"
/// breakpoints = [400, 800, 1200, 1600]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizeConfig {
    /// Encoding engine; `copy` preserves original bytes and skips the
    /// responsive stage.
    pub engine: Engine,

    /// Target widths for responsive variants, in pixels.
    pub breakpoints: Vec<u32>,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Builtin,
            breakpoints: vec![400, 800, 1200, 1600],
        }
    }
}
