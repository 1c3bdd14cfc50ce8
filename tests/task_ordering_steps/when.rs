//! When steps for task ordering BDD scenarios.

use super::world::{OrderingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use todo_engine::{engine::MoveScope, task::services::CreateTaskRequest};

/// Creates a task whose text is `name` and remembers it under that name.
///
/// # Errors
///
/// Returns an error when the engine rejects the task.
pub fn create_named(world: &mut OrderingWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(world.engine.create_task(CreateTaskRequest::new(name.clone(), 5)))
        .wrap_err_with(|| format!("create task {name}"))?;
    world.tasks_by_name.insert(name, created);
    Ok(())
}

#[when(r#"the task "{name}" is created"#)]
fn task_is_created(world: &mut OrderingWorld, name: String) -> Result<(), eyre::Report> {
    create_named(world, name)
}

#[when(r#""{name}" is moved down"#)]
fn task_is_moved_down(world: &mut OrderingWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.named(&name)?.id();
    run_async(world.engine.move_task_down(id, MoveScope::AllTasks)).wrap_err("move down")?;
    Ok(())
}

#[when(r#""{name}" is moved up"#)]
fn task_is_moved_up(world: &mut OrderingWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.named(&name)?.id();
    run_async(world.engine.move_task_up(id, MoveScope::AllTasks)).wrap_err("move up")?;
    Ok(())
}

#[when(r#""{name}" is deleted"#)]
fn task_is_deleted(world: &mut OrderingWorld, name: String) -> Result<(), eyre::Report> {
    let id = world.named(&name)?.id();
    run_async(world.engine.delete_task(id)).wrap_err("delete task")?;
    Ok(())
}
