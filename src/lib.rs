//! Backend for the campaign studio demo: an "AI" marketing-campaign
//! generator that streams a rule-built campaign document to the browser as
//! an incremental character stream over SSE.
//!
//! The interesting part is not the campaign rules (static, demo-grade) but
//! the delivery: per-connection emitter tasks chunk the serialized document
//! at a fixed cadence, with cancellation-safe teardown when the client
//! disconnects, multiplexed across many concurrent in-memory sessions.

pub mod catalog;
pub mod config;
pub mod docs;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod streaming;
