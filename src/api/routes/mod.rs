//! API Routes
//!
//! Route handlers organized by functionality.

pub mod catalog;
pub mod days;
pub mod export;
pub mod goals;
pub mod health;
