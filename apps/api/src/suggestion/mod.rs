//! AI rewrite suggestions for resume sections.
//!
//! `service` decides mock vs external and normalizes provider output;
//! `extract` and `heuristic` are the pure pieces it leans on.

pub mod extract;
pub mod handlers;
pub mod heuristic;
pub mod prompts;
pub mod service;
