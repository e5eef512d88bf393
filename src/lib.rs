//! Canale assembles RSS 2.0 documents from already-resolved content entries
//! and serves them over HTTP as a rendering step inside a larger publishing
//! pipeline.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
