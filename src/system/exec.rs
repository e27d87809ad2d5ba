//! Detached command execution.

use crate::error::{Error, Result};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info, warn};

/// Launches commands without ever blocking the caller on the child.
pub trait CommandRunner: Send {
    /// Spawns `exec` through the platform shell, detached. With `verbose`,
    /// child output is forwarded to the log.
    fn spawn_detached(&self, exec: &str, verbose: bool) -> Result<()>;
}

/// [`CommandRunner`] using the system shell.
pub struct ShellRunner;

impl ShellRunner {
    fn shell_command(exec: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("powershell");
            cmd.arg("-NoProfile").arg("-Command").arg(exec);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(exec);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    fn spawn_detached(&self, exec: &str, verbose: bool) -> Result<()> {
        debug!(%exec, "launching");
        let mut cmd = Self::shell_command(exec);
        cmd.stdin(Stdio::null());
        if verbose {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Io {
                message: format!("spawn {exec:?}"),
                path: None,
                source: Some(e),
            })?;

        if verbose {
            let label = exec.to_string();
            let stdout = child.stdout.take();
            let stderr = child.stderr.take();
            thread::spawn(move || {
                if let Some(out) = stdout {
                    for line in BufReader::new(out).lines().map_while(|l| l.ok()) {
                        info!(target: "launch", command = %label, "{line}");
                    }
                }
                if let Some(err) = stderr {
                    for line in BufReader::new(err).lines().map_while(|l| l.ok()) {
                        warn!(target: "launch", command = %label, "{line}");
                    }
                }
                // Reap the child so verbose launches leave no zombies.
                let _ = child.wait();
            });
        } else {
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Ok(())
    }
}
