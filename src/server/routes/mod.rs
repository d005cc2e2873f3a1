//! API Routes
//!
//! Route handlers organized by functionality.

pub mod ai;
pub mod auth;
pub mod health;
pub mod notes;
