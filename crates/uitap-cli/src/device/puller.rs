//! Snapshot transfer: dump the UI hierarchy on the device, pull it local.
//!
//! Two shell commands per snapshot: `uiautomator dump <device path>` then
//! `adb pull <device path> <local path>`. The local file is transient —
//! read once, removed best-effort — because the tree it describes is
//! stale the moment the screen changes.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use uitap_core::outcome::ActionResult;

use crate::device::shell::AdbShell;

/// A snapshot could not be transferred.
#[derive(Debug, Error)]
pub enum PullError {
    #[error("device shell unavailable")]
    Transport,
    #[error("snapshot transfer timed out")]
    Timeout,
    #[error("snapshot command failed (exit {exit_code}): {message}")]
    Command { exit_code: i32, message: String },
    #[error("failed to read pulled snapshot: {0}")]
    Read(#[from] std::io::Error),
}

/// Map a shell step's result into the puller's error space.
fn step(result: ActionResult) -> Result<String, PullError> {
    match result {
        ActionResult::Success { output } => Ok(output),
        ActionResult::CommandFailed { exit_code, message } => {
            Err(PullError::Command { exit_code, message })
        }
        ActionResult::Timeout => Err(PullError::Timeout),
        ActionResult::TransportUnavailable => Err(PullError::Transport),
    }
}

/// Pulls fresh UI snapshots through a device shell.
pub struct SnapshotPuller<'a> {
    shell: &'a AdbShell,
    device_path: String,
    local_path: PathBuf,
}

impl<'a> SnapshotPuller<'a> {
    pub fn new(shell: &'a AdbShell) -> Self {
        // Per-process local path so concurrent invocations don't clobber
        // each other's pulls.
        let local_path =
            std::env::temp_dir().join(format!("uitap-ui-{}.xml", std::process::id()));
        Self {
            shell,
            device_path: shell.config().device_dump_path.clone(),
            local_path,
        }
    }

    /// Capture and transfer one snapshot, returning the raw XML.
    pub async fn pull(&self) -> Result<String, PullError> {
        step(
            self.shell
                .shell(&["uiautomator", "dump", &self.device_path])
                .await,
        )?;

        let local = self.local_path.to_string_lossy();
        step(self.shell.run(&["pull", &self.device_path, &local]).await)?;

        let raw = tokio::fs::read_to_string(&self.local_path).await?;
        debug!(bytes = raw.len(), "pulled snapshot");

        // The file has served its purpose; losing the removal is harmless.
        let _ = tokio::fs::remove_file(&self.local_path).await;

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_maps_every_shell_result() {
        assert_eq!(
            step(ActionResult::Success {
                output: "dumped".into()
            })
            .unwrap(),
            "dumped"
        );
        assert!(matches!(
            step(ActionResult::Timeout),
            Err(PullError::Timeout)
        ));
        assert!(matches!(
            step(ActionResult::TransportUnavailable),
            Err(PullError::Transport)
        ));
        assert!(matches!(
            step(ActionResult::CommandFailed {
                exit_code: 1,
                message: "device offline".into()
            }),
            Err(PullError::Command { exit_code: 1, .. })
        ));
    }
}
