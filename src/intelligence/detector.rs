//! Risk signal detection — pure rule evaluation over a deal snapshot.
//!
//! Rules run in a fixed order and are independent; a deal may trigger
//! several. Nothing deduplicates: the silence rule and the overrun rule
//! can both emit a `stalling` signal for the same deal, and the output
//! keeps detection order (not severity order).
//!
//! Missing optional fields silently disable their rule — no signal, no
//! warning, no flag in the output.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::deal::{Condition, ConditionStatus, ConditionType, Deal, PipelineType};
use crate::intelligence::scoring::expected_stage_days;
use crate::intelligence::types::{RiskSignal, RiskSignalType, Severity, days_between};

/// Days without contact before a deal counts as stalling.
const SILENCE_THRESHOLD_DAYS: i64 = 5;

/// Days without contact before stalling escalates to high severity.
const SILENCE_HIGH_DAYS: i64 = 10;

/// Finance condition fires within this many days of its deadline.
const FINANCE_WINDOW_DAYS: i64 = 2;

/// Building report / LIM conditions fire within this many days.
const REPORT_WINDOW_DAYS: i64 = 1;

/// National median days-on-market; sellers past this draw a signal.
const MARKET_MEDIAN_DAYS: i64 = 50;

/// Days on market past which vendor expectations become high severity.
const MARKET_HIGH_DAYS: i64 = 70;

/// Evaluate all detection rules against a deal snapshot.
pub fn detect_signals(deal: &Deal, now: DateTime<Utc>) -> Vec<RiskSignal> {
    let mut signals = Vec::new();

    if let Some(signal) = silence_rule(deal, now) {
        signals.push(signal);
    }
    if let Some(signal) = stage_overrun_rule(deal, now) {
        signals.push(signal);
    }
    for condition in &deal.conditions {
        if let Some(signal) = condition_deadline_rule(condition, now) {
            signals.push(signal);
        }
    }
    if let Some(signal) = market_duration_rule(deal, now) {
        signals.push(signal);
    }

    signals
}

/// Rule 1: no contact for ≥5 days ⇒ stalling (high at ≥10).
///
/// Skipped entirely when `last_contact_at` is absent.
fn silence_rule(deal: &Deal, now: DateTime<Utc>) -> Option<RiskSignal> {
    let last_contact = deal.last_contact_at?;
    let days_since_contact = days_between(last_contact, now);
    if days_since_contact < SILENCE_THRESHOLD_DAYS {
        return None;
    }

    let severity = if days_since_contact >= SILENCE_HIGH_DAYS {
        Severity::High
    } else {
        Severity::Medium
    };
    debug!(deal_id = %deal.id, days_since_contact, "Silence rule fired");

    Some(RiskSignal {
        signal_type: RiskSignalType::Stalling,
        severity,
        detected_at: now,
        description: format!("No contact with the client in {days_since_contact} days"),
        data_point: Some(format!("{days_since_contact} days since last contact")),
    })
}

/// Rule 2: time in stage exceeds 1.5× the expected duration.
///
/// Conditional-like stages flag as `long_conditional`; everything else
/// flags as `stalling` (possibly doubling up with rule 1).
fn stage_overrun_rule(deal: &Deal, now: DateTime<Utc>) -> Option<RiskSignal> {
    let days_in_stage = days_between(deal.stage_entered_at, now).max(0);
    let expected = expected_stage_days(deal.stage);
    if (days_in_stage as f64) <= expected as f64 * 1.5 {
        return None;
    }

    let severity = if days_in_stage as f64 > expected as f64 * 2.0 {
        Severity::High
    } else {
        Severity::Medium
    };
    let signal_type = if deal.stage.is_conditional_like() {
        RiskSignalType::LongConditional
    } else {
        RiskSignalType::Stalling
    };
    debug!(
        deal_id = %deal.id,
        stage = deal.stage.as_str(),
        days_in_stage,
        expected,
        "Stage overrun rule fired"
    );

    Some(RiskSignal {
        signal_type,
        severity,
        detected_at: now,
        description: format!(
            "{days_in_stage} days in {} against an expected {expected}",
            deal.stage.as_str()
        ),
        data_point: Some(format!("{days_in_stage} days in stage")),
    })
}

/// Rule 3: a pending condition is at or near its deadline.
fn condition_deadline_rule(condition: &Condition, now: DateTime<Utc>) -> Option<RiskSignal> {
    if condition.status != ConditionStatus::Pending {
        return None;
    }
    let days_until_due = days_between(now, condition.due_date);

    let (signal_type, severity, label) = match condition.condition_type {
        ConditionType::Finance if days_until_due <= FINANCE_WINDOW_DAYS => {
            let severity = if days_until_due <= 0 {
                Severity::Critical
            } else {
                Severity::High
            };
            (RiskSignalType::FinanceRisk, severity, "Finance condition")
        }
        ConditionType::BuildingReport if days_until_due <= REPORT_WINDOW_DAYS => {
            (RiskSignalType::BuilderReportDelay, Severity::High, "Building report")
        }
        ConditionType::Lim if days_until_due <= REPORT_WINDOW_DAYS => {
            (RiskSignalType::LimDelay, Severity::Medium, "LIM")
        }
        _ => return None,
    };

    let description = if days_until_due < 0 {
        format!("{label} is {} days overdue", -days_until_due)
    } else if days_until_due == 0 {
        format!("{label} is due today")
    } else {
        format!("{label} due in {days_until_due} days")
    };
    debug!(?signal_type, days_until_due, "Condition deadline rule fired");

    Some(RiskSignal {
        signal_type,
        severity,
        detected_at: now,
        description,
        data_point: Some(format!("{days_until_due} days until due")),
    })
}

/// Rule 4: seller listing past the national median days-on-market.
///
/// Skipped for buyer deals and for sellers without a go-live date.
fn market_duration_rule(deal: &Deal, now: DateTime<Utc>) -> Option<RiskSignal> {
    if deal.pipeline_type != PipelineType::Seller {
        return None;
    }
    let go_live = deal.go_live_date?;
    let days_on_market = days_between(go_live, now);
    if days_on_market <= MARKET_MEDIAN_DAYS {
        return None;
    }

    let severity = if days_on_market > MARKET_HIGH_DAYS {
        Severity::High
    } else {
        Severity::Medium
    };
    debug!(deal_id = %deal.id, days_on_market, "Market duration rule fired");

    Some(RiskSignal {
        signal_type: RiskSignalType::VendorExpectations,
        severity,
        detected_at: now,
        description: format!(
            "{days_on_market} days on market against a {MARKET_MEDIAN_DAYS}-day national median"
        ),
        data_point: Some(format!("{days_on_market} days on market")),
    })
}
