//! # ZmartBot Core Types
//!
//! The shared vocabulary of the scoring workspace. Every other crate speaks in
//! terms of these enums and records.
//!
//! As a Layer 0 crate it has no knowledge of configuration, providers, or
//! scoring arithmetic. It only defines shapes and a few static lookup tables
//! (risk buckets, pattern polarity) that belong to the types themselves.

pub mod endpoint;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use endpoint::{Endpoint, EndpointPattern};
pub use enums::{
    Direction, MarketCondition, ModuleKind, PatternType, Polarity, PositionRecommendation,
    RiskLevel,
};
pub use error::CoreError;
pub use structs::{
    CalibratedScore, EndpointScore, FinalScore, MarketData, ModuleContribution, ModuleScore,
    ModuleSet, ScoreRecord, TradingParameters,
};
