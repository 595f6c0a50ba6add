pub mod npm;
pub mod yarn;

use anyhow::{bail, Result};
use regex::Regex;
use std::process::Command;

use crate::context::InvocationContext;

/// The two package managers this tool can drive. Yarn is preferred;
/// npm takes over when it launched this process or when yarn is
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerKind {
    Yarn,
    Npm,
}

impl ManagerKind {
    pub fn other(self) -> Self {
        match self {
            ManagerKind::Yarn => ManagerKind::Npm,
            ManagerKind::Npm => ManagerKind::Yarn,
        }
    }

    pub fn bin(self) -> &'static str {
        match self {
            ManagerKind::Yarn => "yarn",
            ManagerKind::Npm => "npm",
        }
    }
}

/// Trait for package manager CLI integrations
pub trait PackageManager {
    /// Binary name to invoke
    fn bin(&self) -> &'static str;

    /// Arguments for installing dependencies; `dev` selects the
    /// development group. Grammar differs per manager family.
    fn add_args(&self, deps: &[String], dev: bool) -> Vec<String>;

    /// Probe the binary with its version flag. A failed spawn or a
    /// non-zero exit both mean "unavailable", never an error.
    fn is_available(&self) -> bool {
        probe(self.bin())
    }
}

/// Get a package manager integration by kind
pub fn get_manager(kind: ManagerKind) -> Box<dyn PackageManager> {
    match kind {
        ManagerKind::Yarn => Box::new(yarn::YarnManager),
        ManagerKind::Npm => Box::new(npm::NpmManager),
    }
}

fn probe(bin: &str) -> bool {
    if which::which(bin).is_err() {
        return false;
    }

    Command::new(bin)
        .arg("-v")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Patterns identifying npm or npx as the binary that launched this
/// process. The separator convention is fixed when the set is built,
/// not per match.
pub struct BinPatterns {
    cli_js: Regex,
    bin_path: Regex,
}

impl BinPatterns {
    /// Pattern set for the host platform.
    pub fn host() -> Result<Self> {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }

    pub fn windows() -> Result<Self> {
        Ok(Self {
            cli_js: Regex::new(r"[\\/]node_modules[\\/]npm[\\/]bin[\\/]np[mx]-cli\.js$")?,
            bin_path: Regex::new(r"[\\/]np[mx](\.cmd)?$")?,
        })
    }

    pub fn unix() -> Result<Self> {
        Ok(Self {
            cli_js: Regex::new(r"/node_modules/npm/bin/np[mx]-cli\.js$")?,
            bin_path: Regex::new(r"/np[mx]$")?,
        })
    }
}

/// Default candidate from invocation evidence alone: yarn, unless the
/// invoking script or binary path points at npm/npx.
pub fn detect_default(ctx: &InvocationContext, patterns: &BinPatterns) -> ManagerKind {
    let cli_js_hit = [&ctx.npm_cli_js, &ctx.npx_cli_js]
        .iter()
        .any(|var| var.as_deref().is_some_and(|p| patterns.cli_js.is_match(p)));
    let bin_hit = ctx
        .invoking_bin
        .as_deref()
        .is_some_and(|p| patterns.bin_path.is_match(p));

    if cli_js_hit || bin_hit {
        ManagerKind::Npm
    } else {
        ManagerKind::Yarn
    }
}

/// Resolve the package manager to drive. Runs fresh on every
/// invocation: detection default first, then the availability probe,
/// swapping to the other candidate when the default is missing.
pub fn resolve(ctx: &InvocationContext) -> Result<ManagerKind> {
    let patterns = BinPatterns::host()?;
    resolve_with(ctx, &patterns, |kind| get_manager(kind).is_available())
}

pub fn resolve_with(
    ctx: &InvocationContext,
    patterns: &BinPatterns,
    probe: impl Fn(ManagerKind) -> bool,
) -> Result<ManagerKind> {
    let mut kind = detect_default(ctx, patterns);

    if !probe(kind) {
        kind = kind.other();
        if !probe(kind) {
            bail!("No package manager found.");
        }
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(npm: Option<&str>, npx: Option<&str>, bin: Option<&str>) -> InvocationContext {
        InvocationContext {
            npm_cli_js: npm.map(String::from),
            npx_cli_js: npx.map(String::from),
            invoking_bin: bin.map(String::from),
        }
    }

    #[test]
    fn test_default_is_yarn_without_evidence() {
        let patterns = BinPatterns::unix().unwrap();
        assert_eq!(
            detect_default(&ctx(None, None, None), &patterns),
            ManagerKind::Yarn
        );
        assert_eq!(
            detect_default(&ctx(None, None, Some("/usr/bin/zsh")), &patterns),
            ManagerKind::Yarn
        );
    }

    #[test]
    fn test_npm_cli_script_selects_npm() {
        let patterns = BinPatterns::unix().unwrap();
        let script = "/usr/lib/node_modules/npm/bin/npm-cli.js";
        assert_eq!(
            detect_default(&ctx(Some(script), None, None), &patterns),
            ManagerKind::Npm
        );
    }

    #[test]
    fn test_npx_cli_script_selects_npm() {
        let patterns = BinPatterns::unix().unwrap();
        let script = "/usr/lib/node_modules/npm/bin/npx-cli.js";
        assert_eq!(
            detect_default(&ctx(None, Some(script), None), &patterns),
            ManagerKind::Npm
        );
    }

    #[test]
    fn test_invoking_binary_selects_npm() {
        let patterns = BinPatterns::unix().unwrap();
        for bin in ["/usr/local/bin/npm", "/usr/local/bin/npx"] {
            assert_eq!(
                detect_default(&ctx(None, None, Some(bin)), &patterns),
                ManagerKind::Npm
            );
        }
    }

    #[test]
    fn test_unix_patterns_ignore_backslash_paths() {
        let patterns = BinPatterns::unix().unwrap();
        assert_eq!(
            detect_default(&ctx(None, None, Some(r"C:\nodejs\npm.cmd")), &patterns),
            ManagerKind::Yarn
        );
    }

    #[test]
    fn test_windows_patterns_match_both_separators() {
        let patterns = BinPatterns::windows().unwrap();
        for bin in [r"C:\nodejs\npm.cmd", r"C:\nodejs\npm", "C:/nodejs/npx"] {
            assert_eq!(
                detect_default(&ctx(None, None, Some(bin)), &patterns),
                ManagerKind::Npm
            );
        }
        let script = r"C:\nodejs\node_modules\npm\bin\npm-cli.js";
        assert_eq!(
            detect_default(&ctx(Some(script), None, None), &patterns),
            ManagerKind::Npm
        );
    }

    #[test]
    fn test_partial_name_does_not_match() {
        let patterns = BinPatterns::unix().unwrap();
        // "pnpm" ends in "npm" as a substring but not as a path entry
        assert_eq!(
            detect_default(&ctx(None, None, Some("/usr/bin/pnpm")), &patterns),
            ManagerKind::Yarn
        );
    }

    #[test]
    fn test_resolve_prefers_detected_default() {
        let patterns = BinPatterns::unix().unwrap();
        let kind = resolve_with(&ctx(None, None, None), &patterns, |_| true).unwrap();
        assert_eq!(kind, ManagerKind::Yarn);

        let script = "/usr/lib/node_modules/npm/bin/npm-cli.js";
        let kind = resolve_with(&ctx(Some(script), None, None), &patterns, |_| true).unwrap();
        assert_eq!(kind, ManagerKind::Npm);
    }

    #[test]
    fn test_resolve_swaps_when_default_unavailable() {
        let patterns = BinPatterns::unix().unwrap();
        let kind = resolve_with(&ctx(None, None, None), &patterns, |k| k == ManagerKind::Npm)
            .unwrap();
        assert_eq!(kind, ManagerKind::Npm);

        let script = "/usr/lib/node_modules/npm/bin/npm-cli.js";
        let kind = resolve_with(&ctx(Some(script), None, None), &patterns, |k| {
            k == ManagerKind::Yarn
        })
        .unwrap();
        assert_eq!(kind, ManagerKind::Yarn);
    }

    #[test]
    fn test_resolve_fails_when_neither_available() {
        let patterns = BinPatterns::unix().unwrap();
        let err = resolve_with(&ctx(None, None, None), &patterns, |_| false).unwrap_err();
        assert!(err.to_string().contains("No package manager found"));
    }

    #[test]
    fn test_manager_factory() {
        assert_eq!(get_manager(ManagerKind::Yarn).bin(), "yarn");
        assert_eq!(get_manager(ManagerKind::Npm).bin(), "npm");
    }

    #[test]
    fn test_kind_other_swaps() {
        assert_eq!(ManagerKind::Yarn.other(), ManagerKind::Npm);
        assert_eq!(ManagerKind::Npm.other(), ManagerKind::Yarn);
    }
}
