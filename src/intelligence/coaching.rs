//! Coaching insight — one human-readable sentence per analysis.

use crate::intelligence::catalog::top_signal;
use crate::intelligence::types::{RiskSignal, RiskSignalType};

/// Shown when no risk signals are present.
pub const ON_TRACK_MESSAGE: &str = "This deal is progressing well. Keep the momentum going!";

/// Coaching template per signal type. `{days}` is replaced with the
/// stage day count — always the stage count, even for signals whose own
/// trigger was a different clock (silence, due dates).
fn template_for(signal_type: RiskSignalType) -> &'static str {
    match signal_type {
        RiskSignalType::Stalling => {
            "This deal has gone quiet after {days} days in its current stage. \
             A quick check-in can restart momentum before it drifts further."
        }
        RiskSignalType::ColdBuyer => {
            "This buyer has cooled off. A fresh listing match or market update is \
             the fastest way to bring them back into the conversation."
        }
        RiskSignalType::FinanceRisk => {
            "Finance is coming down to the wire. Get ahead of the deadline before \
             it turns into an extension request."
        }
        RiskSignalType::BuilderReportDelay => {
            "The building report is cutting it close. Chase the inspector today so \
             the condition doesn't slip."
        }
        RiskSignalType::LimDelay => {
            "The LIM is due back imminently. Confirm the council timeline so there \
             are no surprises at the deadline."
        }
        RiskSignalType::ValuationGap => {
            "There's a gap between expectation and the market. Fresh comparable \
             sales will ground that conversation in evidence."
        }
        RiskSignalType::VendorExpectations => {
            "After {days} days in this stage the campaign needs a reset \
             conversation with the vendor, led by buyer feedback."
        }
        RiskSignalType::LongConditional => {
            "This conditional period has run {days} days. Check each outstanding \
             condition and give the other side a nudge."
        }
    }
}

/// Build the coaching sentence for an analysis.
pub fn coaching_insight(signals: &[RiskSignal], days_in_stage: i64) -> String {
    match top_signal(signals) {
        Some(top) => {
            template_for(top.signal_type).replace("{days}", &days_in_stage.to_string())
        }
        None => ON_TRACK_MESSAGE.to_string(),
    }
}
