//! Ordered task list with scores, categories, and subtasks.
//!
//! Tasks are kept in a manual order through integer positions: new tasks
//! land at the top and users move them with adjacent swaps. A task may sit
//! under a parent, and deleting a parent removes its whole subtree. Records
//! written by older versions are normalised on load and written back once.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
