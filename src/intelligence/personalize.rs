//! Draft personalization — fills a power move's placeholders from the
//! deal at call time.
//!
//! Invoked by the caller once they decide to act on a suggestion, not
//! as part of analysis. `[X]` is recomputed from `stage_entered_at` at
//! call time, so it can drift from the day count the original analysis
//! used if time has passed in between.

use chrono::{DateTime, Utc};

use crate::deal::Deal;
use crate::intelligence::types::{PowerMove, days_between};

/// Fallback when the deal has no contact to address.
const FALLBACK_NAME: &str = "there";

/// Fallback when the deal has no property reference.
const FALLBACK_ADDRESS: &str = "the property";

/// Return a copy of `power_move` with every draft placeholder filled.
///
/// `[Agent]` is a deliberate stub: it always substitutes "there". There
/// is no agent lookup in this engine.
pub fn personalize(power_move: &PowerMove, deal: &Deal, now: DateTime<Utc>) -> PowerMove {
    let address = deal
        .property
        .as_ref()
        .map(|p| p.address.as_str())
        .unwrap_or(FALLBACK_ADDRESS);
    let name = deal
        .primary_contact()
        .map(|c| c.name.as_str())
        .unwrap_or(FALLBACK_NAME);
    let days_in_stage = days_between(deal.stage_entered_at, now).max(0);

    let draft_content = power_move
        .draft_content
        .replace("[Address]", address)
        .replace("[Vendor Name]", name)
        .replace("[Name]", name)
        .replace("[Agent]", FALLBACK_NAME)
        .replace("[X]", &days_in_stage.to_string());

    PowerMove {
        draft_content,
        ..power_move.clone()
    }
}
