//! Search orchestrator: intent extraction, concurrent provider fan-out,
//! order-stable merge and the sample-data safety nets.

pub mod aggregate;

pub use aggregate::Aggregator;
