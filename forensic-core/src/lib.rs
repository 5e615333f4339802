// forensic-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports: contracts the engine is fed through (RuleSource).
pub mod ports;

// 2. Domain: text handling, evidence, rule model, condition evaluation.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure: config files, rule files on disk, atomic writes.
pub mod infrastructure;

// 4. Application: registry, engine facade, aggregation, history, reports.
pub mod application;

// --- ERROR FACADE ---
pub mod error;

pub use application::ComplianceEngine;
pub use error::ForensicError;
