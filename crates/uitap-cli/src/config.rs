//! Device configuration loading.
//!
//! Connection details are an explicit value passed into the shell at
//! construction time, never process-wide state. Priority:
//!
//! 1. Built-in defaults
//! 2. Config file (`UITAP_CONFIG`, else `~/.config/uitap/config.json`)
//! 3. CLI flags

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The scroll gesture used to reveal off-screen content: a downward
/// content swipe (finger moves up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeGesture {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub duration_ms: u64,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self {
            x1: 500,
            y1: 1500,
            x2: 500,
            y2: 500,
            duration_ms: 300,
        }
    }
}

/// Everything the device-facing collaborators need to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Shell executable, normally just `adb` on PATH.
    pub adb_program: String,
    /// Device serial or `ip:port` for wireless debugging. `None` lets adb
    /// pick the only connected device.
    pub serial: Option<String>,
    /// Deadline for every single shell command.
    pub command_timeout_ms: u64,
    /// Pause after a scroll (or app launch) before the next snapshot, so
    /// the UI can settle.
    pub settle_ms: u64,
    /// Scroll gesture for the retry search.
    pub scroll: SwipeGesture,
    /// Keywords the defensive scanner dismisses. Locale-specific; changing
    /// this set changes behavior without changing the algorithm.
    pub dismiss_keywords: Vec<String>,
    /// Component launched by `uitap bootstrap`.
    pub bootstrap_component: String,
    /// Where `uiautomator dump` writes on the device.
    pub device_dump_path: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_program: "adb".to_string(),
            serial: None,
            command_timeout_ms: 5_000,
            settle_ms: 1_000,
            scroll: SwipeGesture::default(),
            dismiss_keywords: [
                "ok",
                "lanjutkan",
                "izinkan",
                "selesai",
                "tutup",
                "perbarui",
                "notifikasi",
                "lanjut",
            ]
            .map(String::from)
            .to_vec(),
            bootstrap_component: "moefou.shizuku.privileged.api/.MainActivity".to_string(),
            device_dump_path: "/sdcard/uitap-ui.xml".to_string(),
        }
    }
}

impl DeviceConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Config file location.
    ///
    /// `UITAP_CONFIG` overrides (ignoring the empty string); otherwise the
    /// platform config dir, e.g. `~/.config/uitap/config.json` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var("UITAP_CONFIG") {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("uitap").join("config.json"))
    }

    /// Load the config file, falling back to defaults when none exists.
    /// A file that exists but does not parse is an error, not a silent
    /// fallback.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }
}
