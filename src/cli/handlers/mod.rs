// src/cli/handlers/mod.rs

//! One module per CLI action. Every handler has the same signature so the
//! binary can keep them in a single registry.

pub mod config;
pub mod format;
pub mod profile;
