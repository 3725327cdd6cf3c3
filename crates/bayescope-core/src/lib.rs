//! bayescope-core — sequential Bayesian evidence fusion for binary diagnosis.
//!
//! This crate defines the evidence model, belief state, and the update
//! engine that fuses diagnostic test results into a posterior trajectory
//! via Bayes' rule under conditional independence.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
