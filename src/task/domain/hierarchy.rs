//! Parent/child relationships between tasks.

use super::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Returns the level of a subtask created under `parent`.
#[must_use]
pub const fn child_level(parent: &Task) -> u32 {
    parent.level().saturating_add(1)
}

/// Groups task identifiers by their parent.
fn children_index(tasks: &[Task]) -> HashMap<TaskId, Vec<TaskId>> {
    let mut index: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
    for task in tasks {
        if let Some(parent_id) = task.parent_id() {
            index.entry(parent_id).or_default().push(task.id());
        }
    }
    index
}

/// Returns every transitive descendant of `root`, deepest first.
///
/// Each task appears after all of its own descendants, so deleting in the
/// returned order never leaves a child whose parent is already gone. `root`
/// itself is not included. Malformed parent cycles are visited once.
#[must_use]
pub fn descendants_deepest_first(root: TaskId, tasks: &[Task]) -> Vec<TaskId> {
    let index = children_index(tasks);
    let mut visited = HashSet::from([root]);
    let mut ordered = Vec::new();
    // Explicit stack of (task, children already expanded).
    let mut stack = vec![(root, false)];

    while let Some((current, expanded)) = stack.pop() {
        if expanded {
            if current != root {
                ordered.push(current);
            }
            continue;
        }
        stack.push((current, true));
        for child in index.get(&current).into_iter().flatten() {
            if visited.insert(*child) {
                stack.push((*child, false));
            }
        }
    }
    ordered
}

/// Returns `true` when `candidate` descends from `ancestor`.
#[must_use]
pub fn is_descendant(candidate: TaskId, ancestor: TaskId, tasks: &[Task]) -> bool {
    descendants_deepest_first(ancestor, tasks).contains(&candidate)
}
