use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Environment override for the distribution root.
pub const HOME_VAR: &str = "TSNEW_HOME";

/// Configuration for tsnew
#[derive(Debug, Clone)]
pub struct Config {
    /// Distribution root holding tsconfig.json and template/
    pub tool_root: PathBuf,
}

impl Config {
    /// Load configuration
    pub fn load() -> Result<Self> {
        if let Ok(root) = env::var(HOME_VAR) {
            return Ok(Self {
                tool_root: PathBuf::from(root),
            });
        }

        // target/<profile>/tsnew during development, <prefix>/bin/tsnew
        // when installed; walk up until the template payload appears
        let exe = env::current_exe().context("Failed to locate the running executable")?;
        let tool_root = exe
            .ancestors()
            .skip(1)
            .find(|dir| dir.join("template").is_dir())
            .map(|dir| dir.to_path_buf())
            .with_context(|| format!("No template directory found near {}", exe.display()))?;

        Ok(Self { tool_root })
    }
}
