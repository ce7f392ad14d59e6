//! Core use-case services.
//!
//! # Responsibility
//! - Run entity operations on connections acquired per call.
//! - Keep callers decoupled from connection lifetime management.

pub mod publishing_service;
