//! Jira Sherpa - conversational issue tracking assistant.
//!
//! Turns free-text requests into structured Jira operations by combining LLM
//! intent extraction with a deterministic, per-user, field-by-field
//! collection interview.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
