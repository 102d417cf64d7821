//! Shared types for the deal intelligence engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Risk signals ────────────────────────────────────────────────────

/// How urgently a signal needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    /// Sort rank: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
        }
    }
}

/// The closed set of conditions the engine knows how to flag.
///
/// Every variant has a power move and a coaching template, even the
/// ones the local detector never emits (`cold_buyer`, `valuation_gap`
/// arrive only from the richer remote analysis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignalType {
    Stalling,
    ColdBuyer,
    FinanceRisk,
    BuilderReportDelay,
    LimDelay,
    ValuationGap,
    VendorExpectations,
    LongConditional,
}

/// A detected condition indicating the deal needs attention.
///
/// The detector may emit several signals of the same type for one deal;
/// nothing deduplicates them. List order is detection-rule order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSignal {
    #[serde(rename = "type")]
    pub signal_type: RiskSignalType,
    pub severity: Severity,
    pub detected_at: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_point: Option<String>,
}

// ── Power moves ─────────────────────────────────────────────────────

/// Delivery channel for a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMoveAction {
    Call,
    Email,
    Text,
}

impl PowerMoveAction {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Text => "text",
        }
    }
}

/// A catalog-defined remedial action with draft content.
///
/// `draft_content` carries the placeholders `[Name]`, `[Address]`,
/// `[Vendor Name]`, `[Agent]` and `[X]` until personalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerMove {
    pub action: PowerMoveAction,
    pub headline: String,
    pub rationale: String,
    pub draft_content: String,
    pub priority: u8,
}

// ── Analysis output ─────────────────────────────────────────────────

/// Three-level stage health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageHealth {
    Healthy,
    Warning,
    Critical,
}

/// Email sentiment placeholder. The local engine always reports
/// `Neutral`; real sentiment only arrives from the remote analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSentiment {
    Positive,
    Neutral,
    Negative,
}

/// One complete analysis of a deal snapshot.
///
/// Recomputed fresh on every call; the engine never caches or persists
/// these. Every field is populated except `suggested_power_move`
/// (nullable) and `executive_summary` (remote-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealIntelligence {
    pub deal_id: Uuid,
    /// Composite well-being indicator, 0–100.
    pub health_score: u8,
    /// Signed heuristic of which way the deal is trending.
    pub health_velocity: i32,
    pub risk_signals: Vec<RiskSignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_power_move: Option<PowerMove>,
    pub coaching_insight: String,
    pub email_sentiment: EmailSentiment,
    pub needs_live_session: bool,
    pub days_in_stage: i64,
    pub stage_health_status: StageHealth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
}

// ── Day arithmetic ──────────────────────────────────────────────────

/// Whole days from `earlier` to `later`, floored.
///
/// Floor division (not truncation) so a span of −0.5 days reads as −1,
/// matching how due-date countdowns behave in the CRM.
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds().div_euclid(86_400)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn severity_rank_orders_critical_first() {
        assert!(Severity::Critical.rank() < Severity::High.rank());
        assert!(Severity::High.rank() < Severity::Medium.rank());
    }

    #[test]
    fn days_between_floors_positive_spans() {
        let now = Utc::now();
        assert_eq!(days_between(now - Duration::hours(36), now), 1);
        assert_eq!(days_between(now - Duration::hours(23), now), 0);
        assert_eq!(days_between(now, now), 0);
    }

    #[test]
    fn days_between_floors_negative_spans() {
        let now = Utc::now();
        // Due in 12 hours: not a full day away, counts as 0 days until due
        assert_eq!(days_between(now, now + Duration::hours(12)), 0);
        // 12 hours overdue floors to -1, not 0
        assert_eq!(days_between(now, now - Duration::hours(12)), -1);
        assert_eq!(days_between(now, now - Duration::hours(36)), -2);
    }

    #[test]
    fn risk_signal_serializes_type_field() {
        let signal = RiskSignal {
            signal_type: RiskSignalType::FinanceRisk,
            severity: Severity::Critical,
            detected_at: Utc::now(),
            description: "Finance condition deadline has passed".into(),
            data_point: None,
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "finance_risk");
        assert_eq!(json["severity"], "critical");
        assert!(json.get("dataPoint").is_none());
    }

    #[test]
    fn intelligence_omits_absent_optionals() {
        let intel = DealIntelligence {
            deal_id: Uuid::new_v4(),
            health_score: 100,
            health_velocity: 2,
            risk_signals: vec![],
            suggested_power_move: None,
            coaching_insight: "fine".into(),
            email_sentiment: EmailSentiment::Neutral,
            needs_live_session: false,
            days_in_stage: 0,
            stage_health_status: StageHealth::Healthy,
            executive_summary: None,
        };
        let json = serde_json::to_value(&intel).unwrap();
        assert!(json.get("suggestedPowerMove").is_none());
        assert!(json.get("executiveSummary").is_none());
        assert_eq!(json["emailSentiment"], "neutral");
        assert_eq!(json["stageHealthStatus"], "healthy");
    }
}
