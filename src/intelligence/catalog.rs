//! Power move catalog and selection.
//!
//! The catalog is an immutable, process-wide table built once and keyed
//! 1:1 by risk signal type. Selection picks the most severe signal
//! (stable on detection order among ties) and returns a clone of its
//! catalog entry, so callers can personalize the draft without touching
//! the shared table.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::intelligence::types::{PowerMove, PowerMoveAction, RiskSignal, RiskSignalType};

static CATALOG: OnceLock<HashMap<RiskSignalType, PowerMove>> = OnceLock::new();

fn entry(
    action: PowerMoveAction,
    headline: &str,
    rationale: &str,
    draft_content: &str,
    priority: u8,
) -> PowerMove {
    PowerMove {
        action,
        headline: headline.into(),
        rationale: rationale.into(),
        draft_content: draft_content.into(),
        priority,
    }
}

/// The fixed 8-entry move catalog, built on first use.
fn catalog() -> &'static HashMap<RiskSignalType, PowerMove> {
    CATALOG.get_or_init(|| {
        HashMap::from([
            (
                RiskSignalType::Stalling,
                entry(
                    PowerMoveAction::Call,
                    "Momentum Check-In Call",
                    "Deals that go quiet past five days rarely restart on their own.",
                    "Hi [Name], it's been a little while since we spoke about [Address]. \
                     We're [X] days into this stage and I'd love to keep things moving for you. \
                     When suits a quick chat?",
                    1,
                ),
            ),
            (
                RiskSignalType::ColdBuyer,
                entry(
                    PowerMoveAction::Text,
                    "Warm Up a Cold Buyer",
                    "A fresh listing match is the fastest way to re-engage a buyer who has drifted.",
                    "Hi [Name], a property just came up that's a strong match for what you're \
                     after. Want me to send through the details before it hits the portals?",
                    3,
                ),
            ),
            (
                RiskSignalType::FinanceRisk,
                entry(
                    PowerMoveAction::Call,
                    "Finance Deadline Call",
                    "A finance condition at its deadline is the most common way a conditional deal dies.",
                    "Hi [Name], calling about the finance condition on [Address] — the deadline \
                     is close and I want to make sure your broker has everything they need. \
                     Should we be talking to the vendor about an extension?",
                    1,
                ),
            ),
            (
                RiskSignalType::BuilderReportDelay,
                entry(
                    PowerMoveAction::Call,
                    "Chase the Builder's Report",
                    "A late building report compresses every decision that depends on it.",
                    "Hi [Name], quick one on [Address] — the building report is due and I \
                     haven't seen it land yet. I'll chase the inspector today; can you confirm \
                     you're happy with the original scope?",
                    2,
                ),
            ),
            (
                RiskSignalType::LimDelay,
                entry(
                    PowerMoveAction::Email,
                    "LIM Follow-Up",
                    "Council turnaround on a LIM is outside anyone's control, so confirm it early.",
                    "Hi [Name],\n\nThe LIM for [Address] is due back shortly. I've asked the \
                     council for a status update and will forward it the moment it arrives. If \
                     the timeline slips we should agree the next step before the deadline.",
                    4,
                ),
            ),
            (
                RiskSignalType::ValuationGap,
                entry(
                    PowerMoveAction::Email,
                    "Bridge the Valuation Gap",
                    "Fresh comparable sales ground an expectations conversation in evidence.",
                    "Hi [Vendor Name],\n\nI've pulled together three recent comparable sales \
                     near [Address] so we can look at where the market is actually landing. \
                     Could we find fifteen minutes this week to walk through them?",
                    2,
                ),
            ),
            (
                RiskSignalType::VendorExpectations,
                entry(
                    PowerMoveAction::Call,
                    "Vendor Expectations Reset",
                    "Past the median days-on-market, buyer feedback beats another open home.",
                    "Hi [Vendor Name], now that [Address] has been on the market for a while \
                     I'd like to walk you through the buyer feedback and where interest is \
                     sitting. We're [X] days into the current stage — could we meet this week?",
                    2,
                ),
            ),
            (
                RiskSignalType::LongConditional,
                entry(
                    PowerMoveAction::Email,
                    "Conditional Period Nudge",
                    "Long conditional periods drift unless every outstanding item has an owner.",
                    "Hi [Agent],\n\nFollowing up on the outstanding conditions for [Address] — \
                     we're [X] days in and I'd like to lock down the remaining items this week. \
                     Can you confirm where each one sits on your side?",
                    3,
                ),
            ),
        ])
    })
}

/// The most severe signal, stable on detection order among ties.
pub(crate) fn top_signal(signals: &[RiskSignal]) -> Option<&RiskSignal> {
    signals
        .iter()
        .enumerate()
        .min_by_key(|(index, signal)| (signal.severity.rank(), *index))
        .map(|(_, signal)| signal)
}

/// Pick the recommended move for a set of signals.
///
/// Returns `None` when no signals are present; otherwise a clone of the
/// catalog entry for the top signal's type.
pub fn select_power_move(signals: &[RiskSignal]) -> Option<PowerMove> {
    let top = top_signal(signals)?;
    let power_move = catalog()
        .get(&top.signal_type)
        .cloned()
        .expect("catalog covers every RiskSignalType");
    debug!(
        signal_type = ?top.signal_type,
        action = power_move.action.label(),
        headline = %power_move.headline,
        "Power move selected"
    );
    Some(power_move)
}
