//! Deal intelligence engine.
//!
//! A deal snapshot flows through:
//! 1. `detector::detect_signals` — ordered, independent risk rules
//! 2. `scoring::health_score` + `scoring::classify` — weighted 0–100 score
//! 3. `catalog::select_power_move` — one recommended action, or none
//! 4. `coaching::coaching_insight` — one explanatory sentence
//!
//! `engine::analyse` composes all of it into one immutable result.
//! `personalize::personalize` is invoked later by the caller, never
//! automatically. `client::IntelligenceService` is the network-backed
//! variant that falls back to the local engine.

pub mod catalog;
pub mod client;
pub mod coaching;
pub mod detector;
pub mod engine;
pub mod personalize;
pub mod scoring;
pub mod types;

pub use client::{DealApi, HttpDealApi, IntelligenceService};
pub use engine::analyse;
pub use personalize::personalize;
pub use types::{
    DealIntelligence, EmailSentiment, PowerMove, PowerMoveAction, RiskSignal, RiskSignalType,
    Severity, StageHealth,
};
