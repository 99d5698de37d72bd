//! Lead extraction service: job tracking and the HTTP API over it.

pub mod config;
pub mod jobs;
pub mod server;
