//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage and recommendation calls into planner use cases.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod planner_service;
