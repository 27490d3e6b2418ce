//! Directory walk configuration.
//!
//! ```toml
//! [walk]
//! sort = true          # stable sibling order across runs
//! follow_links = true  # descend into symlinked directories
//! ```

use serde::{Deserialize, Serialize};

use crate::asset::Walker;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub sort: bool,
    pub follow_links: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            sort: true,
            follow_links: true,
        }
    }
}

impl WalkConfig {
    /// A walker configured from this section.
    pub fn walker(&self) -> Walker {
        Walker::new()
            .sort(self.sort)
            .follow_links(self.follow_links)
    }
}
