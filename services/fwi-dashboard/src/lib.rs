//! FWI Dashboard Service Library
//!
//! HTTP server for exploring a gridded Fire Weather Index dataset one date
//! at a time: an HTML page, JSON endpoints and PNG renderings of the map and
//! the value histogram.

pub mod boundaries;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod state;
pub mod view;
