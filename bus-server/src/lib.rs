//! Bus stop and arrivals proxy.
//!
//! Accepts small JSON requests, forwards them to the TfL Unified API and
//! returns a trimmed-down JSON response.

pub mod config;
pub mod tfl;
pub mod web;
