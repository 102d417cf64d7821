//! Health scoring and status classification.
//!
//! Deterministic weighted deductions from a base of 100: per-signal
//! severity, stage overrun, and the deal's pre-existing risk flag.
//! Thresholds and the expected-duration table are fixed constants.

use crate::deal::{Deal, DealStage, RiskLevel};
use crate::intelligence::types::{RiskSignal, Severity, StageHealth};

/// Expected days in a stage when no specific entry exists.
pub const DEFAULT_STAGE_DAYS: i64 = 14;

/// Scores at or above this read as healthy.
pub const HEALTHY_THRESHOLD: u8 = 70;

/// Scores at or above this (and below healthy) read as warning.
pub const WARNING_THRESHOLD: u8 = 40;

/// Overrun penalty never exceeds this.
const MAX_OVERRUN_PENALTY: f64 = 25.0;

/// Expected number of days a deal spends in each stage.
pub fn expected_stage_days(stage: DealStage) -> i64 {
    match stage {
        DealStage::Appraisal => 7,
        DealStage::ListingPrep => 14,
        DealStage::OnMarket => 45,
        DealStage::Consult => 7,
        DealStage::Shortlisting => 14,
        DealStage::Viewings => 21,
        DealStage::Offer => 7,
        DealStage::Conditional => 15,
        DealStage::Unconditional => 10,
        DealStage::PreSettlement => 30,
        DealStage::Nurture => 90,
        DealStage::Settled => DEFAULT_STAGE_DAYS,
    }
}

/// Compute the 0–100 health score for a deal.
///
/// Deductions accumulate unbounded and are clamped once at the end, so
/// a pile of critical signals cannot push the score below zero or let a
/// later bonus resurrect it.
pub fn health_score(deal: &Deal, signals: &[RiskSignal], days_in_stage: i64) -> u8 {
    let mut score = 100.0_f64;

    for signal in signals {
        score -= match signal.severity {
            Severity::Critical => 30.0,
            Severity::High => 20.0,
            Severity::Medium => 10.0,
        };
    }

    let expected = expected_stage_days(deal.stage);
    if days_in_stage > expected {
        let overrun = 15.0 * (days_in_stage - expected) as f64 / expected as f64;
        score -= overrun.min(MAX_OVERRUN_PENALTY);
    }

    score -= match deal.risk_level {
        RiskLevel::Critical => 15.0,
        RiskLevel::High => 10.0,
        RiskLevel::Medium => 5.0,
        RiskLevel::Low | RiskLevel::None => 0.0,
    };

    score.clamp(0.0, 100.0).round() as u8
}

/// Map a health score to its three-level status.
///
/// The boundaries are literal: a score of exactly 70 is healthy.
pub fn classify(score: u8) -> StageHealth {
    if score >= HEALTHY_THRESHOLD {
        StageHealth::Healthy
    } else if score >= WARNING_THRESHOLD {
        StageHealth::Warning
    } else {
        StageHealth::Critical
    }
}
