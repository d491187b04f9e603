//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Android UI automation over adb.
///
/// Pull uiautomator snapshots, locate on-screen elements by keyword, and
/// drive taps, swipes, and key events. Designed for scripted and agent
/// consumption with structured JSON output.
#[derive(Debug, Parser)]
#[command(name = "uitap", version)]
pub struct Cli {
    /// Target a specific device serial (passed to adb as -s)
    #[arg(short, long, global = true, value_name = "SERIAL")]
    pub serial: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether a device is connected and authorized
    Status,

    /// Print the device's physical screen resolution
    Resolution,

    /// Tap at an absolute screen coordinate
    #[command(after_help = "\
Examples:
  uitap tap 540 960                     # Tap the middle of a 1080x1920 screen
  uitap -s emulator-5554 tap 100 200    # Tap on a specific device")]
    Tap(TapArgs),

    /// Swipe between two screen coordinates
    #[command(after_help = "\
Examples:
  uitap swipe 500 1500 500 500          # Scroll down one screenful
  uitap swipe 100 960 900 960 --duration 150   # Fast horizontal fling")]
    Swipe(SwipeArgs),

    /// Send an Android key event by code
    #[command(after_help = "\
Common codes:
  3 = HOME   4 = BACK   26 = POWER   66 = ENTER   82 = MENU

Examples:
  uitap key 4                           # Press back
  uitap key 66                          # Press enter")]
    Key(KeyArgs),

    /// Dump the current UI hierarchy as raw XML
    Dump,

    /// Find an element by keyword, scrolling to reveal it, and tap it
    #[command(after_help = "\
Matching is case-insensitive substring against each node's text and
content-desc; only nodes with on-screen bounds are eligible. The first
match in document order wins, and its bounds center is tapped.

Examples:
  uitap find Start                      # One look, then one scroll if absent
  uitap find --scrolls 0 Start          # Above-the-fold only, never scroll
  uitap find --scrolls 5 'Terms'        # Keep scrolling, up to five times

Exit status is 1 when no element was found.")]
    Find(FindArgs),

    /// Scan the current screen for known prompts and dismiss the first one
    #[command(after_help = "\
Without flags the configured dismiss keyword list is used. The scan is
a single pass over one snapshot: no scrolling, no re-capture.

Examples:
  uitap dismiss                         # Use configured keywords
  uitap dismiss -k ok -k allow          # Override the keyword list
  uitap dismiss --file dump.xml         # Scan a saved dump instead of the device")]
    Dismiss(DismissArgs),

    /// Launch an activity by component name
    #[command(after_help = "\
Examples:
  uitap launch com.android.settings/.Settings")]
    Launch(LaunchArgs),

    /// Launch the configured bootstrap app and press its start button
    Bootstrap,
}

#[derive(Debug, clap::Args)]
pub struct TapArgs {
    /// X coordinate in pixels
    pub x: u32,

    /// Y coordinate in pixels
    pub y: u32,
}

#[derive(Debug, clap::Args)]
pub struct SwipeArgs {
    /// Start X coordinate
    pub x1: u32,

    /// Start Y coordinate
    pub y1: u32,

    /// End X coordinate
    pub x2: u32,

    /// End Y coordinate
    pub y2: u32,

    /// Gesture duration in milliseconds
    #[arg(long, default_value_t = 300, value_name = "MS")]
    pub duration: u64,
}

#[derive(Debug, clap::Args)]
pub struct KeyArgs {
    /// Android key event code
    pub code: u32,
}

#[derive(Debug, clap::Args)]
pub struct FindArgs {
    /// Keyword to match against element text and content-desc
    pub keyword: String,

    /// Maximum number of scrolls after the initial look
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub scrolls: u32,
}

#[derive(Debug, clap::Args)]
pub struct DismissArgs {
    /// Keyword(s) to dismiss, overriding the configured list
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Scan a saved XML dump instead of pulling a fresh snapshot
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct LaunchArgs {
    /// Activity component, package/.Activity form
    pub component: String,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_find_parses_scroll_budget() {
        let cli = Cli::parse_from(["uitap", "find", "--scrolls", "3", "Start"]);

        match cli.command {
            Commands::Find(args) => {
                assert_eq!(args.keyword, "Start");
                assert_eq!(args.scrolls, 3);
            }
            _ => panic!("Expected find command"),
        }
    }

    #[test]
    fn test_serial_is_global() {
        let cli = Cli::parse_from(["uitap", "tap", "10", "20", "--serial", "emulator-5554"]);
        assert_eq!(cli.serial.as_deref(), Some("emulator-5554"));
    }

    #[test]
    fn test_dismiss_accepts_repeated_keywords() {
        let cli = Cli::parse_from(["uitap", "dismiss", "-k", "ok", "-k", "allow"]);

        match cli.command {
            Commands::Dismiss(args) => {
                assert_eq!(args.keywords, vec!["ok", "allow"]);
                assert!(args.file.is_none());
            }
            _ => panic!("Expected dismiss command"),
        }
    }
}
