//! WebSocket front end for the card lobby.
//!
//! Exposes the router, configuration and observability setup used by the
//! `cl_server` binary so they can be exercised from integration tests.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
