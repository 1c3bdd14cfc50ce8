//! Category management through the engine facade.

use super::helpers::{FixedClock, clock, open};
use rstest::rstest;
use todo_engine::{
    category::{
        domain::CategoryId,
        services::{CreateCategoryRequest, UpdateCategoryRequest},
    },
    query::TaskQuery,
    task::services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_category_moves_its_tasks_to_work(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    let errands = engine
        .create_category(CreateCategoryRequest::new("Errands", "#aabbcc"))
        .await?;
    let task = engine
        .create_task(CreateTaskRequest::new("Post office", 5).with_category(errands.id().as_str()))
        .await?;
    let other = engine
        .create_task(CreateTaskRequest::new("Read", 2).with_category("life"))
        .await?;

    let deletion = engine.delete_category(errands.id().as_str()).await?;
    let tasks = engine.load_tasks().await?;
    let categories = engine.load_categories().await?;

    assert_eq!(deletion.reassigned, vec![task.id()]);
    let known: Vec<&CategoryId> = categories.iter().map(|category| category.id()).collect();
    assert!(tasks.iter().all(|loaded| known.contains(&loaded.category_id())));
    let moved = tasks
        .iter()
        .find(|loaded| loaded.id() == task.id())
        .ok_or_else(|| eyre::eyre!("reassigned task missing"))?;
    let untouched = tasks
        .iter()
        .find(|loaded| loaded.id() == other.id())
        .ok_or_else(|| eyre::eyre!("unrelated task missing"))?;
    assert_eq!(moved.category_id(), &CategoryId::fallback());
    assert_eq!(untouched.category_id().as_str(), "life");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn categories_can_be_renamed_and_filtered_on(clock: FixedClock) -> eyre::Result<()> {
    let harness = open(clock).await?;
    let engine = &harness.engine;
    engine
        .create_task(CreateTaskRequest::new("Gym", 5).with_category("life"))
        .await?;
    engine.create_task(CreateTaskRequest::new("Report", 10)).await?;

    let renamed = engine
        .update_category(UpdateCategoryRequest::new("life").with_name("Personal"))
        .await?;
    let life_only = engine
        .query_tasks(&TaskQuery::new().with_category(renamed.id().clone()))
        .await?;

    assert_eq!(renamed.name().as_str(), "Personal");
    assert_eq!(life_only.len(), 1);
    Ok(())
}
