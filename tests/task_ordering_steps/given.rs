//! Given steps for task ordering BDD scenarios.

use super::when::create_named;
use super::world::{OrderingWorld, run_async, split_names};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todo_engine::task::services::AddSubtaskRequest;

fn seed_categories(world: &OrderingWorld) -> Result<(), eyre::Report> {
    run_async(world.engine.seed_default_categories()).wrap_err("seed default categories")?;
    Ok(())
}

#[given("an empty task list")]
fn empty_task_list(world: &mut OrderingWorld) -> Result<(), eyre::Report> {
    seed_categories(world)
}

#[given(r#"the tasks "{names}" were created in that order"#)]
fn tasks_created_in_order(world: &mut OrderingWorld, names: String) -> Result<(), eyre::Report> {
    seed_categories(world)?;
    for name in split_names(&names) {
        create_named(world, name)?;
    }
    Ok(())
}

#[given(r#""{child}" is a subtask of "{parent}""#)]
fn subtask_of(
    world: &mut OrderingWorld,
    child: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let parent_id = world.named(&parent)?.id();
    let created = run_async(
        world
            .engine
            .add_subtask(AddSubtaskRequest::new(parent_id, child.clone(), 5)),
    )
    .wrap_err("add subtask")?;
    world.tasks_by_name.insert(child, created);
    Ok(())
}
