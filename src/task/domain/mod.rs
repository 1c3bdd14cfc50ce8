//! Domain model for the ordered task list.
//!
//! Tasks carry a priority score, a manual ordering position, a category and
//! an optional parent. Ordering, hierarchy, and load-time normalisation are
//! pure functions over task slices; persistence stays behind the ports.

mod error;
mod hierarchy;
mod ids;
mod ordering;
mod record;
mod score;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use hierarchy::{child_level, descendants_deepest_first, is_descendant};
pub use ids::{TaskId, TaskText};
pub use ordering::{MoveDirection, PositionSwap, plan_move, position_for_new_item};
pub use record::{BackfilledField, NormalizedTask, TaskRecord, TaskRecordError, normalize};
pub use score::Score;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskStatus};
