//! Then steps for task ordering BDD scenarios.

use super::world::{OrderingWorld, split_names};
use rstest_bdd_macros::then;

#[then(r#"the list reads "{names}""#)]
fn list_reads(world: &OrderingWorld, names: String) -> Result<(), eyre::Report> {
    let expected = split_names(&names);
    let listed = world.listed_names()?;
    if listed != expected {
        return Err(eyre::eyre!("expected list {expected:?}, found {listed:?}"));
    }
    Ok(())
}

#[then(r#""{child}" is one level below "{parent}""#)]
fn one_level_below(
    world: &OrderingWorld,
    child: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let child_task = world.named(&child)?;
    let parent_task = world.named(&parent)?;
    if child_task.parent_id() != Some(parent_task.id()) {
        return Err(eyre::eyre!("{child} is not a subtask of {parent}"));
    }
    if child_task.level() != parent_task.level() + 1 {
        return Err(eyre::eyre!(
            "expected {child} at level {}, found {}",
            parent_task.level() + 1,
            child_task.level()
        ));
    }
    Ok(())
}
