//! External process boundary. Invocations block until the child exits;
//! no timeout is imposed.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a command with the child's streams wired to this process's, so
/// interactive prompts reach the operator. Non-zero exit is an error.
pub fn run_interactive(bin: &str, args: &[String], cwd: &Path) -> Result<()> {
    let status = Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to run command: {} {}", bin, args.join(" ")))?;

    if !status.success() {
        bail!("Command failed ({}): {} {}", status, bin, args.join(" "));
    }

    Ok(())
}

/// Run a command capturing its output; the child's stderr is folded
/// into the error on a non-zero exit.
pub fn run_captured(bin: &str, args: &[String], cwd: &Path) -> Result<()> {
    let output = Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .output()
        .with_context(|| format!("Failed to run command: {} {}", bin, args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "Command failed ({}): {} {}\n{}",
            output.status,
            bin,
            args.join(" "),
            stderr.trim()
        );
    }

    Ok(())
}
