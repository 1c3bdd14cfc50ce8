//! Step definitions for task ordering scenarios.

mod given;
mod then;
mod when;
pub mod world;
