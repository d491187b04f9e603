//! adb subprocess execution and outcome classification.
//!
//! One command in, one [`ActionResult`] out. Classification happens here,
//! at the process boundary, so nothing above it ever string-matches error
//! output:
//!
//! - nonzero exit → `CommandFailed` (stderr preferred, stdout fallback)
//! - deadline exceeded → `Timeout` (the child is killed)
//! - spawn failure → `TransportUnavailable`
//! - otherwise → `Success` with trimmed stdout
//!
//! No retries live here; retry policy belongs to callers. Concurrent
//! invocations share the physical device, and whether adb serializes
//! interleaved `input` commands safely is an external assumption this
//! crate documents rather than guarantees.

use std::process::Stdio;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use uitap_core::geometry::Point;
use uitap_core::outcome::ActionResult;

use crate::config::{DeviceConfig, SwipeGesture};

/// Handle to the adb shell of one device.
pub struct AdbShell {
    config: DeviceConfig,
}

impl AdbShell {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Run one `adb [-s serial] <args..>` command with the configured
    /// deadline and classify the result.
    pub async fn run(&self, args: &[&str]) -> ActionResult {
        let mut cmd = Command::new(&self.config.adb_program);
        if let Some(serial) = &self.config.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(?args, "dispatching adb command");

        let output = match timeout(self.config.command_timeout(), cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(error = %e, "failed to spawn {}", self.config.adb_program);
                return ActionResult::TransportUnavailable;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.command_timeout_ms,
                    ?args,
                    "adb command exceeded its deadline"
                );
                return ActionResult::Timeout;
            }
        };

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            ActionResult::Success { output: stdout }
        } else {
            // Exit code is the authoritative failure signal; stderr is
            // diagnostic, with stdout as fallback when stderr is empty.
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let message = if stderr.is_empty() { stdout } else { stderr };
            ActionResult::CommandFailed {
                exit_code: output.status.code().unwrap_or(-1),
                message,
            }
        }
    }

    /// Run a command inside the device shell (`adb shell <args..>`).
    pub async fn shell(&self, args: &[&str]) -> ActionResult {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("shell");
        argv.extend_from_slice(args);
        self.run(&argv).await
    }

    /// Tap at a screen coordinate.
    pub async fn tap(&self, point: Point) -> ActionResult {
        let x = point.x.to_string();
        let y = point.y.to_string();
        self.shell(&["input", "tap", &x, &y]).await
    }

    /// Linear swipe between two points.
    pub async fn swipe(&self, gesture: &SwipeGesture) -> ActionResult {
        let x1 = gesture.x1.to_string();
        let y1 = gesture.y1.to_string();
        let x2 = gesture.x2.to_string();
        let y2 = gesture.y2.to_string();
        let duration = gesture.duration_ms.to_string();
        self.shell(&["input", "swipe", &x1, &y1, &x2, &y2, &duration])
            .await
    }

    /// Send a key event code (4 is Back, 3 is Home).
    pub async fn key_event(&self, code: u32) -> ActionResult {
        let code = code.to_string();
        self.shell(&["input", "keyevent", &code]).await
    }

    /// List connected devices (`adb devices`).
    pub async fn devices(&self) -> ActionResult {
        self.run(&["devices"]).await
    }

    /// Query the physical screen size (`wm size`).
    pub async fn wm_size(&self) -> ActionResult {
        self.shell(&["wm", "size"]).await
    }

    /// Launch an app component (`am start -n <component>`).
    pub async fn launch(&self, component: &str) -> ActionResult {
        self.shell(&["am", "start", "-n", component]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shell pointed at an arbitrary local program instead of adb, so
    /// classification can be exercised without a device.
    fn fake_shell(program: &str, timeout_ms: u64) -> AdbShell {
        AdbShell::new(DeviceConfig {
            adb_program: program.to_string(),
            command_timeout_ms: timeout_ms,
            ..DeviceConfig::default()
        })
    }

    #[tokio::test]
    async fn zero_exit_is_success_with_trimmed_stdout() {
        let shell = fake_shell("echo", 5_000);
        match shell.run(&["hello world"]).await {
            ActionResult::Success { output } => assert_eq!(output, "hello world"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_is_command_failed_with_code() {
        let shell = fake_shell("sh", 5_000);
        match shell.run(&["-c", "echo oops >&2; exit 3"]).await {
            ActionResult::CommandFailed { exit_code, message } => {
                assert_eq!(exit_code, 3);
                assert_eq!(message, "oops");
            }
            other => panic!("expected command failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stdout_is_the_fallback_diagnostic() {
        let shell = fake_shell("sh", 5_000);
        match shell.run(&["-c", "echo from-stdout; exit 1"]).await {
            ActionResult::CommandFailed { message, .. } => assert_eq!(message, "from-stdout"),
            other => panic!("expected command failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_transport_unavailable() {
        let shell = fake_shell("definitely-not-a-real-binary-uitap", 5_000);
        assert_eq!(
            shell.run(&["devices"]).await,
            ActionResult::TransportUnavailable
        );
    }

    #[tokio::test]
    async fn deadline_overrun_is_timeout() {
        let shell = fake_shell("sleep", 50);
        assert_eq!(shell.run(&["5"]).await, ActionResult::Timeout);
    }

    #[tokio::test]
    async fn serial_is_inserted_before_the_command() {
        // `echo` stands in for adb, so the serial args show up in stdout.
        let shell = AdbShell::new(DeviceConfig {
            adb_program: "echo".to_string(),
            serial: Some("192.168.1.16:41367".to_string()),
            ..DeviceConfig::default()
        });
        match shell.run(&["devices"]).await {
            ActionResult::Success { output } => {
                assert_eq!(output, "-s 192.168.1.16:41367 devices");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
