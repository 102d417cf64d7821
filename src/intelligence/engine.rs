//! Analysis orchestration — one immutable result per call.
//!
//! `analyse` is synchronous, pure, and side-effect-free: the same
//! `(deal, now)` always yields the same `DealIntelligence`. Nothing is
//! cached or persisted here; that is the calling layer's concern.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::deal::Deal;
use crate::intelligence::catalog::select_power_move;
use crate::intelligence::coaching::coaching_insight;
use crate::intelligence::detector::detect_signals;
use crate::intelligence::scoring::{classify, expected_stage_days, health_score};
use crate::intelligence::types::{DealIntelligence, EmailSentiment, Severity, days_between};

/// Analyse a deal snapshot as of `now`.
pub fn analyse(deal: &Deal, now: DateTime<Utc>) -> DealIntelligence {
    let days_in_stage = days_between(deal.stage_entered_at, now).max(0);
    let expected = expected_stage_days(deal.stage);

    let risk_signals = detect_signals(deal, now);
    let score = health_score(deal, &risk_signals, days_in_stage);
    let status = classify(score);
    let suggested_power_move = select_power_move(&risk_signals);
    let insight = coaching_insight(&risk_signals, days_in_stage);

    let has_critical = risk_signals
        .iter()
        .any(|s| s.severity == Severity::Critical);
    let needs_live_session =
        has_critical || risk_signals.len() >= 3 || days_in_stage > expected * 2;

    let signal_count = risk_signals.len() as i32;
    let base_velocity = if signal_count > 0 { -2 * signal_count } else { 2 };
    let overrun_drag = if days_in_stage > expected { -1 } else { 0 };
    let health_velocity = base_velocity + overrun_drag;

    debug!(
        deal_id = %deal.id,
        score,
        status = ?status,
        signals = risk_signals.len(),
        days_in_stage,
        "Deal analysed"
    );

    DealIntelligence {
        deal_id: deal.id,
        health_score: score,
        health_velocity,
        risk_signals,
        suggested_power_move,
        coaching_insight: insight,
        // Placeholder: real sentiment only comes from the remote analysis
        email_sentiment: EmailSentiment::Neutral,
        needs_live_session,
        days_in_stage,
        stage_health_status: status,
        executive_summary: None,
    }
}
