//! # Endpoint Scoring
//!
//! Turns one data-provider endpoint response into an `EndpointScore`: a 0-100
//! score, a confidence, and a set of typed pattern tags.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure functions over decoded records. No I/O, no shared state.
//! - **Typed Boundary:** Raw JSON is decoded once into `EndpointResponse`, a closed
//!   tagged union. Scorers never see an untyped map.
//! - **Total:** Scoring never fails. Undecodable or incomplete payloads are scored
//!   neutral with low confidence; transport failures are the caller's concern and
//!   are recorded with `EndpointScore::failed`.
//!
//! ## Public API
//!
//! - `EndpointRegistry`: the ordered endpoint set with declared weights.
//! - `score_endpoint`: decode and score one payload.
//! - `EndpointResponse`: the decoded response union.

pub mod context;
pub mod error;
pub mod lenient;
pub mod liquidation;
pub mod momentum;
pub mod positioning;
pub mod registry;
pub mod responses;
pub mod scorer;
pub mod screener;
pub mod trend;
pub mod volume;

pub use error::EndpointError;
pub use registry::EndpointRegistry;
pub use responses::EndpointResponse;
pub use scorer::{score_endpoint, score_response};
