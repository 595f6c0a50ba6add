use std::env;

/// Read-only snapshot of the invocation environment, taken once at
/// startup. Feeds package-manager detection.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Path of the npm CLI script, when npm launched this process.
    pub npm_cli_js: Option<String>,
    /// Path of the npx CLI script, when npx launched this process.
    pub npx_cli_js: Option<String>,
    /// Raw path of the binary that launched this process (`$_`).
    pub invoking_bin: Option<String>,
}

impl InvocationContext {
    pub fn capture() -> Self {
        Self {
            npm_cli_js: env::var("NPM_CLI_JS").ok(),
            npx_cli_js: env::var("NPX_CLI_JS").ok(),
            invoking_bin: env::var("_").ok(),
        }
    }
}
