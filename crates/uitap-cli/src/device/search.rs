//! Scroll-retry search and the defensive scanner.
//!
//! Two policies over the same locate machinery:
//!
//! - [`find_and_act`] is persistent: snapshot → locate → scroll when the
//!   target is absent, bounded by an explicit attempt budget.
//! - [`scan_and_dismiss`] is opportunistic: one pass over a snapshot that
//!   is already on hand, no scrolling and no re-capture, dismissing the
//!   first known interruption prompt it sees.
//!
//! Both keep "element found" and "tap succeeded" separate (see
//! [`SearchReport`]). Snapshot-then-act is not atomic: the connection can
//! drop between capture and tap, and when it does the late tap surfaces
//! as a failed [`ActionResult`] rather than being papered over.

use std::time::Duration;

use tracing::{debug, info, warn};

use uitap_core::geometry::Point;
use uitap_core::locator;
use uitap_core::matcher::KeywordSet;
use uitap_core::outcome::{ActionResult, SearchOutcome, SearchReport};
use uitap_core::tree::{parse_snapshot, UiNode};

use crate::config::{DeviceConfig, SwipeGesture};
use crate::device::puller::{PullError, SnapshotPuller};
use crate::device::shell::AdbShell;

/// Where fresh snapshots come from. The production impl dumps and pulls
/// through adb; tests script a sequence of canned snapshots.
pub trait SnapshotSource {
    async fn fetch(&mut self) -> Result<String, PullError>;
}

impl SnapshotSource for SnapshotPuller<'_> {
    async fn fetch(&mut self) -> Result<String, PullError> {
        self.pull().await
    }
}

/// The input half of the device: taps and scroll swipes.
pub trait InputDevice {
    async fn tap(&self, point: Point) -> ActionResult;
    async fn swipe(&self, gesture: &SwipeGesture) -> ActionResult;
}

impl InputDevice for AdbShell {
    async fn tap(&self, point: Point) -> ActionResult {
        AdbShell::tap(self, point).await
    }

    async fn swipe(&self, gesture: &SwipeGesture) -> ActionResult {
        AdbShell::swipe(self, gesture).await
    }
}

/// Retry budget and scroll behavior for one search.
#[derive(Debug, Clone)]
pub struct SearchPolicy {
    /// How many scrolls may be issued after the initial attempt. Zero
    /// means a single above-the-fold look.
    pub max_scrolls: u32,
    pub scroll: SwipeGesture,
    pub settle: Duration,
}

impl SearchPolicy {
    pub fn from_config(config: &DeviceConfig, max_scrolls: u32) -> Self {
        Self {
            max_scrolls,
            scroll: config.scroll,
            settle: config.settle(),
        }
    }
}

/// Search for an element matching `keywords`, scrolling to reveal more
/// content when it is absent, and tap it when found.
///
/// Per attempt: fetch a fresh snapshot, parse, locate. A parse or fetch
/// failure consumes the attempt instead of aborting — the dump may have
/// been captured mid-transition — and only decides the outcome when it
/// happens on the final attempt. On a hit the tap is dispatched and the
/// search returns `Found` immediately; the tap's own result is reported
/// alongside, never folded into the search outcome.
pub async fn find_and_act<S, D>(
    source: &mut S,
    device: &D,
    keywords: &KeywordSet,
    policy: &SearchPolicy,
) -> SearchReport
where
    S: SnapshotSource,
    D: InputDevice,
{
    let mut last_miss = SearchOutcome::NotFound;

    for attempt in 0..=policy.max_scrolls {
        match source.fetch().await {
            Ok(raw) => match parse_snapshot(&raw) {
                Ok(root) => {
                    if let Some(point) = locator::locate_point(&root, keywords) {
                        info!(%point, attempt, "element located, dispatching tap");
                        let action = device.tap(point).await;
                        if !action.is_success() {
                            warn!(%action, "tap failed after the element was located");
                        }
                        return SearchReport::acted(point, action);
                    }
                    debug!(attempt, "no matching element in this snapshot");
                    last_miss = SearchOutcome::NotFound;
                }
                Err(e) => {
                    warn!(error = %e, attempt, "snapshot did not parse, attempt consumed");
                    last_miss = SearchOutcome::ParseError;
                }
            },
            Err(e) => {
                warn!(error = %e, attempt, "snapshot fetch failed, attempt consumed");
                last_miss = SearchOutcome::TransportError;
            }
        }

        if attempt < policy.max_scrolls {
            debug!(attempt, "scrolling to reveal more content");
            let swiped = device.swipe(&policy.scroll).await;
            if !swiped.is_success() {
                // The next fetch will classify the condition; nothing to
                // do here but note it.
                warn!(%swiped, "scroll swipe failed");
            }
            tokio::time::sleep(policy.settle).await;
        }
    }

    SearchReport::not_acted(last_miss)
}

/// Single-pass defensive scan over an already-parsed snapshot.
///
/// Analyzes what is on hand: never scrolls and never re-captures, so a
/// scan stays cheap enough to run opportunistically against a snapshot
/// pulled for another purpose. Taps the first node matching the dismiss
/// keywords and reports both the find and the tap.
pub async fn scan_and_dismiss<D>(
    root: &UiNode,
    keywords: &KeywordSet,
    device: &D,
) -> SearchReport
where
    D: InputDevice,
{
    let Some(node) = locator::locate(root, keywords) else {
        debug!("no dismissable prompt on screen");
        return SearchReport::not_acted(SearchOutcome::NotFound);
    };

    // The matcher only accepts nodes with bounds.
    let Some(rect) = node.bounds else {
        return SearchReport::not_acted(SearchOutcome::NotFound);
    };

    let point = rect.center();
    info!(%point, label = node.label(), "dismissable prompt found, tapping");

    let action = device.tap(point).await;
    if !action.is_success() {
        warn!(%action, "dismiss tap failed after the prompt was located");
    }

    SearchReport::acted(point, action)
}
