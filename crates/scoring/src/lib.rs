//! # Master Scoring
//!
//! Blends the Cryptometer, RiskMetric and KingFisher module scores into one
//! `FinalScore`: a market regime picks a base weight row, confidence shifts the
//! weights, detected patterns scale the blend, and module confidence dampens it.
//!
//! The agent is an ordinary value. Callers construct it with its settings and a
//! history store and share it however they like; it is `Send + Sync`.

pub mod agent;
pub mod condition;
pub mod error;
pub mod history;
pub mod insights;
pub mod learning;
pub mod patterns;
pub mod risk;
pub mod trading;
pub mod weights;

#[cfg(test)]
mod test_support;

pub use agent::MasterScoringAgent;
pub use condition::classify_market_condition;
pub use error::ScoringError;
pub use history::{HistoryStore, InMemoryHistory};
pub use learning::{LearningAdjustment, LearningSystem};
pub use patterns::{detect_patterns, pattern_coefficient};
pub use weights::calculate_dynamic_weights;
