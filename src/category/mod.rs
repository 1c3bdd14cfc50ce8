//! Category management for the todo engine.
//!
//! Categories are coloured labels applied to tasks. A small set of default
//! categories is seeded into an empty store, and deleting a category moves
//! its tasks onto the fallback category before the category disappears, so
//! no task ever references a missing category. The module follows the same
//! hexagonal layout as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
