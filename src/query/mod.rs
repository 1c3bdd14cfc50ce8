//! Read-side queries over a loaded task list.
//!
//! Nothing here touches storage. Callers load tasks once and then filter,
//! arrange, or summarise them; view state such as the selected category or
//! the "show completed" toggle travels in a [`TaskQuery`].

mod filter;
mod outline;
mod stats;
mod timeframe;

pub use filter::TaskQuery;
pub use outline::{OutlineEntry, outline};
pub use stats::{ScoreCount, TaskStatistics};
pub use timeframe::CompletionTimeframe;
