//! uitap CLI entry point.

mod args;
mod config;
mod device;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};
use uitap_core::geometry::Point;
use uitap_core::matcher::KeywordSet;
use uitap_core::outcome::{ActionResult, SearchOutcome};
use uitap_core::tree::parse_snapshot;

use crate::args::{Cli, Commands};
use crate::config::{DeviceConfig, SwipeGesture};
use crate::device::puller::SnapshotPuller;
use crate::device::search::{find_and_act, scan_and_dismiss, SearchPolicy};
use crate::device::shell::AdbShell;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = DeviceConfig::load()?;
    if cli.serial.is_some() {
        config.serial = cli.serial.clone();
    }

    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let shell = AdbShell::new(config);

        match cli.command {
            Commands::Status => status(&shell).await,
            Commands::Resolution => resolution(&shell).await,
            Commands::Tap(args) => {
                finish_action(shell.tap(Point { x: args.x, y: args.y }).await)
            }
            Commands::Swipe(args) => {
                let gesture = SwipeGesture {
                    x1: args.x1,
                    y1: args.y1,
                    x2: args.x2,
                    y2: args.y2,
                    duration_ms: args.duration,
                };
                finish_action(shell.swipe(&gesture).await)
            }
            Commands::Key(args) => finish_action(shell.key_event(args.code).await),
            Commands::Dump => {
                let mut puller = SnapshotPuller::new(&shell);
                let raw = puller.pull().await.context("failed to pull UI snapshot")?;
                println!("{}", raw);
                Ok(())
            }
            Commands::Find(args) => find(&shell, &args.keyword, args.scrolls).await,
            Commands::Dismiss(args) => dismiss(&shell, &args).await,
            Commands::Launch(args) => finish_action(shell.launch(&args.component).await),
            Commands::Bootstrap => bootstrap(&shell).await,
        }
    })
}

/// Print a dispatched action's result, failing the process on anything
/// short of success.
fn finish_action(action: ActionResult) -> anyhow::Result<()> {
    match action {
        ActionResult::Success { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        other => bail!("{}", other),
    }
}

async fn status(shell: &AdbShell) -> anyhow::Result<()> {
    match shell.devices().await {
        ActionResult::Success { output } => match connected_device(&output) {
            Some(serial) => {
                println!("connected: {}", serial);
                Ok(())
            }
            None => bail!("no connected device (run `adb devices` to check authorization)"),
        },
        other => bail!("{}", other),
    }
}

/// Pick the first authorized device out of `adb devices` output.
///
/// The listing starts with a header line; each device line is
/// `<serial>\t<state>`, and only the `device` state is usable
/// (`unauthorized` and `offline` are not).
fn connected_device(listing: &str) -> Option<&str> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once('\t'))
        .find(|(_, state)| state.trim() == "device")
        .map(|(serial, _)| serial.trim())
}

async fn resolution(shell: &AdbShell) -> anyhow::Result<()> {
    match shell.wm_size().await {
        ActionResult::Success { output } => match parse_resolution(&output) {
            Some(size) => {
                println!("{}", size);
                Ok(())
            }
            None => bail!("unexpected wm size output: {}", output),
        },
        other => bail!("{}", other),
    }
}

/// Extract `WIDTHxHEIGHT` from `wm size` output ("Physical size: 1080x1920").
fn parse_resolution(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Physical size: "))
        .map(str::trim)
}

async fn find(shell: &AdbShell, keyword: &str, scrolls: u32) -> anyhow::Result<()> {
    let keywords = KeywordSet::single(keyword);
    if keywords.is_empty() {
        bail!("keyword must not be blank");
    }

    let policy = SearchPolicy::from_config(shell.config(), scrolls);
    let mut puller = SnapshotPuller::new(shell);
    let report = find_and_act(&mut puller, shell, &keywords, &policy).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.outcome.is_found() {
        std::process::exit(1);
    }
    Ok(())
}

async fn dismiss(shell: &AdbShell, args: &args::DismissArgs) -> anyhow::Result<()> {
    let keywords = if args.keywords.is_empty() {
        KeywordSet::new(shell.config().dismiss_keywords.iter())
    } else {
        KeywordSet::new(args.keywords.iter())
    };
    if keywords.is_empty() {
        bail!("dismiss keyword list is empty");
    }

    let raw = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut puller = SnapshotPuller::new(shell);
            puller.pull().await.context("failed to pull UI snapshot")?
        }
    };
    let root = parse_snapshot(&raw).context("snapshot did not parse")?;

    let report = scan_and_dismiss(&root, &keywords, shell).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Launch the configured bootstrap activity, wait for it to settle, and
/// press its start button if one is visible above the fold.
async fn bootstrap(shell: &AdbShell) -> anyhow::Result<()> {
    let component = shell.config().bootstrap_component.clone();
    info!(%component, "launching bootstrap activity");

    let launched = shell.launch(&component).await;
    if !launched.is_success() {
        bail!("launch failed: {}", launched);
    }
    tokio::time::sleep(shell.config().settle()).await;

    // A single above-the-fold look: the start button is on the app's
    // front screen or it isn't there at all.
    let keywords = KeywordSet::single("start");
    let policy = SearchPolicy::from_config(shell.config(), 0);
    let mut puller = SnapshotPuller::new(shell);
    let report = find_and_act(&mut puller, shell, &keywords, &policy).await;

    match report.outcome {
        SearchOutcome::Found { point } => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            let tapped = report.action.as_ref().is_some_and(ActionResult::is_success);
            if tapped {
                info!(%point, "start button pressed, verifying");
                tokio::time::sleep(shell.config().settle()).await;
                let raw = puller.pull().await.context("failed to pull UI snapshot")?;
                if raw.to_lowercase().contains("running") {
                    println!("service reported running");
                } else {
                    println!("service state not confirmed; check the device screen");
                }
            }
            Ok(())
        }
        SearchOutcome::NotFound => {
            println!("no start button on screen; service may already be running");
            Ok(())
        }
        other => bail!("bootstrap check failed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::{connected_device, parse_resolution};

    #[test]
    fn picks_the_first_authorized_device() {
        let listing = "List of devices attached\n192.168.1.16:41367\tdevice\n";
        assert_eq!(connected_device(listing), Some("192.168.1.16:41367"));
    }

    #[test]
    fn skips_unauthorized_and_offline_devices() {
        let listing = "List of devices attached\n\
                       emulator-5554\tunauthorized\n\
                       emulator-5556\toffline\n\
                       emulator-5558\tdevice\n";
        assert_eq!(connected_device(listing), Some("emulator-5558"));
    }

    #[test]
    fn empty_listing_has_no_device() {
        assert_eq!(connected_device("List of devices attached\n"), None);
        assert_eq!(connected_device(""), None);
    }

    #[test]
    fn resolution_strips_the_prefix() {
        assert_eq!(parse_resolution("Physical size: 1080x1920"), Some("1080x1920"));
        assert_eq!(
            parse_resolution("Physical size: 1080x1920\nOverride size: 720x1280"),
            Some("1080x1920")
        );
    }

    #[test]
    fn unexpected_wm_output_is_rejected() {
        assert_eq!(parse_resolution("no size here"), None);
    }
}
