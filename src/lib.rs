//! `todo_engine`: storage-agnostic engine for an ordered personal task list.
//!
//! Tasks carry a priority score, a manual position, a category and an
//! optional parent task. The engine assigns positions, swaps neighbours on
//! move, cascades deletes through subtasks, reassigns tasks when their
//! category goes away, and normalises records written by older versions.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Repository traits the services depend on
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task records, ordering, hierarchy, and load-time normalisation
//! - [`category`]: Category set, defaults, and deletion with reassignment
//! - [`query`]: Read-side filtering, outline ordering, and statistics
//! - [`engine`]: The [`engine::TodoEngine`] facade and its error taxonomy

pub mod cache;
pub mod category;
pub mod config;
pub mod engine;
pub mod persistence;
pub mod query;
pub mod retry;
pub mod task;

#[cfg(test)]
mod test_support;
