//! TravelShare Client Core - Session State and Backend Glue
//!
//! This crate holds the non-UI core of the TravelShare client: the
//! session state observed from the external identity provider, the
//! session-gated application bootstrap, and the account/post operations
//! that pass through to the managed backend (identity provider +
//! schemaless document store).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
