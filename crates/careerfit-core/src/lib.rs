//! careerfit-core — Assessment engine, question catalog, and scoring.
//!
//! This crate defines the question catalog, the assessment state machine
//! that a presentation layer drives, and the pure scoring function that
//! turns a finished answer set into a recommendation.

pub mod builtin;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod results;
pub mod scoring;
