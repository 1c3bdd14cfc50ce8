//! Display ordering with subtasks nested under their parents.

use crate::task::domain::{Task, TaskId};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// One row of an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// The task shown on this row.
    pub task: Task,
    /// Indentation depth; roots are at zero.
    pub depth: u32,
}

/// Arranges `tasks` for display.
///
/// Roots come first, pending before completed and then by position, each
/// followed by its own subtasks ordered the same way. A task whose parent is
/// not in `tasks` (for instance because a filter removed it) is shown as a
/// root.
#[must_use]
pub fn outline(tasks: &[Task]) -> Vec<OutlineEntry> {
    let present: HashSet<TaskId> = tasks.iter().map(Task::id).collect();
    let mut roots = Vec::new();
    let mut children: HashMap<TaskId, Vec<&Task>> = HashMap::new();
    for task in tasks {
        match task.parent_id().filter(|parent| present.contains(parent)) {
            Some(parent) => children.entry(parent).or_default().push(task),
            None => roots.push(task),
        }
    }
    roots.sort_by(|left, right| display_order(left, right));
    for siblings in children.values_mut() {
        siblings.sort_by(|left, right| display_order(left, right));
    }

    let mut entries = Vec::with_capacity(tasks.len());
    let mut visited = HashSet::new();
    let mut stack: Vec<(&Task, u32)> = roots.into_iter().rev().map(|task| (task, 0)).collect();
    while let Some((task, depth)) = stack.pop() {
        if !visited.insert(task.id()) {
            continue;
        }
        entries.push(OutlineEntry {
            task: task.clone(),
            depth,
        });
        if let Some(nested) = children.get(&task.id()) {
            let child_depth = depth.saturating_add(1);
            stack.extend(nested.iter().rev().map(|child| (*child, child_depth)));
        }
    }
    entries
}

fn display_order(left: &Task, right: &Task) -> Ordering {
    left.is_completed()
        .cmp(&right.is_completed())
        .then_with(|| left.position().cmp(&right.position()))
        .then_with(|| left.created_at().cmp(&right.created_at()))
        .then_with(|| left.id().cmp(&right.id()))
}
