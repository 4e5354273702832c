//! Document configuration

use std::time::Duration;

/// Document configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Call `run` on components right after they are built
    pub run_on_load: bool,
    /// Step used by `Document::finish_effects`
    pub fade_frame: Duration,
    /// Keep whitespace-only text nodes when parsing markup
    pub keep_whitespace_text: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_on_load: true,
            fade_frame: Duration::from_millis(16),
            keep_whitespace_text: false,
        }
    }
}
