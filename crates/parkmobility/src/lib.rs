//! Recommendation engine for organizing collective transport at business parks.
//!
//! Ranks mobility solutions against the motivations a business park selected and
//! classifies governance models for a chosen implementation variant.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod wizard;
