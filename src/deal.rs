//! Deal model — the read-only transaction snapshot the engine analyses.
//!
//! These types mirror the CRM's wire format (camelCase JSON, ISO-8601
//! dates). The engine never mutates a `Deal`; it only reads the snapshot
//! it is handed at call time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Pipeline & stage ────────────────────────────────────────────────

/// Which side of the transaction this deal tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineType {
    Buyer,
    Seller,
}

/// A named phase in a deal's pipeline.
///
/// Union of the buyer stages (consult → … → nurture) and the
/// seller-only stages (appraisal, listing_prep, on_market). The engine
/// reads the current stage and elapsed time only — it never validates
/// or drives transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    // Seller-only
    Appraisal,
    ListingPrep,
    OnMarket,
    // Buyer-only
    Consult,
    Shortlisting,
    Viewings,
    Offer,
    // Shared tail
    Conditional,
    Unconditional,
    PreSettlement,
    Settled,
    Nurture,
}

impl DealStage {
    /// Wire name of the stage (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appraisal => "appraisal",
            Self::ListingPrep => "listing_prep",
            Self::OnMarket => "on_market",
            Self::Consult => "consult",
            Self::Shortlisting => "shortlisting",
            Self::Viewings => "viewings",
            Self::Offer => "offer",
            Self::Conditional => "conditional",
            Self::Unconditional => "unconditional",
            Self::PreSettlement => "pre_settlement",
            Self::Settled => "settled",
            Self::Nurture => "nurture",
        }
    }

    /// Whether the stage name contains "conditional".
    ///
    /// Matches the stage-overrun rule's string test, so `unconditional`
    /// counts too. Observed behavior, kept as-is.
    pub fn is_conditional_like(&self) -> bool {
        self.as_str().contains("conditional")
    }
}

// ── Conditions ──────────────────────────────────────────────────────

/// Contractual prerequisite category. The set is open on the wire;
/// unrecognized values land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Finance,
    BuildingReport,
    Lim,
    #[serde(other)]
    Other,
}

/// Condition lifecycle state. Open set; only `Pending` matters to the
/// deadline rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Pending,
    Satisfied,
    #[serde(other)]
    Other,
}

/// A contractual prerequisite with a due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: ConditionStatus,
    pub due_date: DateTime<Utc>,
}

// ── Contacts & property ─────────────────────────────────────────────

/// A person attached to the deal. The first contact in the list is
/// treated as primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Reference to the property under transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub address: String,
}

// ── Risk level ──────────────────────────────────────────────────────

/// Pre-existing qualitative risk flag on the deal, set upstream of this
/// engine and independent of its own signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

// ── Deal ────────────────────────────────────────────────────────────

/// A real-estate transaction snapshot.
///
/// Invariants expected of well-formed input: `stage_entered_at` ≤ now,
/// and `stage` belongs to the enumeration for `pipeline_type`. The
/// engine does not enforce either.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub pipeline_type: PipelineType,
    pub stage: DealStage,
    pub stage_entered_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_at: Option<DateTime<Utc>>,
    /// Sellers only: when the listing went live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_live_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<Property>,
    #[serde(default)]
    pub risk_level: RiskLevel,
}

impl Deal {
    /// First contact in the list, treated as primary.
    pub fn primary_contact(&self) -> Option<&Contact> {
        self.contacts.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_parses_camel_case_wire_format() {
        let json = r#"{
            "id": "7f1a1c2e-8b4d-4f6a-9c3e-2d5b8a7e4f10",
            "pipelineType": "buyer",
            "stage": "conditional",
            "stageEnteredAt": "2026-08-01T09:00:00Z",
            "lastContactAt": "2026-08-20T12:30:00Z",
            "conditions": [
                {"type": "finance", "status": "pending", "dueDate": "2026-08-29T00:00:00Z"}
            ],
            "contacts": [{"name": "Sarah Mitchell", "email": "sarah@example.com"}],
            "property": {"address": "12 Harbour View Rd"},
            "riskLevel": "low"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.pipeline_type, PipelineType::Buyer);
        assert_eq!(deal.stage, DealStage::Conditional);
        assert_eq!(deal.conditions.len(), 1);
        assert_eq!(deal.conditions[0].condition_type, ConditionType::Finance);
        assert_eq!(deal.primary_contact().unwrap().name, "Sarah Mitchell");
        assert_eq!(deal.risk_level, RiskLevel::Low);
    }

    #[test]
    fn deal_parses_with_optionals_absent() {
        let json = r#"{
            "id": "7f1a1c2e-8b4d-4f6a-9c3e-2d5b8a7e4f10",
            "pipelineType": "seller",
            "stage": "on_market",
            "stageEnteredAt": "2026-08-01T09:00:00Z"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert!(deal.last_contact_at.is_none());
        assert!(deal.go_live_date.is_none());
        assert!(deal.conditions.is_empty());
        assert!(deal.primary_contact().is_none());
        assert_eq!(deal.risk_level, RiskLevel::None);
    }

    #[test]
    fn unknown_condition_type_lands_in_other() {
        let json = r#"{"type": "toxicology", "status": "pending", "dueDate": "2026-08-29T00:00:00Z"}"#;
        let cond: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.condition_type, ConditionType::Other);
    }

    #[test]
    fn conditional_like_stages() {
        assert!(DealStage::Conditional.is_conditional_like());
        // "unconditional" contains "conditional" — the string test matches it
        assert!(DealStage::Unconditional.is_conditional_like());
        assert!(!DealStage::Viewings.is_conditional_like());
        assert!(!DealStage::PreSettlement.is_conditional_like());
    }
}
