//! When steps for command flow BDD scenarios.

use super::world::CommandWorld;
use rstest_bdd_macros::when;
use serde_json::json;
use skillsync::bus::domain::Topic;

#[when(r#""{member_id}" is assigned to task "{task_id}""#)]
fn assign_member(
    world: &mut CommandWorld,
    member_id: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": task_id,
        "memberId": member_id,
    });
    world.send(Topic::TaskAssigned, &payload)?;
    Ok(())
}

#[when(r#""{member_id}" completes task "{task_id}""#)]
fn complete_task(
    world: &mut CommandWorld,
    member_id: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": task_id,
        "completedBy": member_id,
    });
    world.send(Topic::TaskCompleted, &payload)?;
    Ok(())
}

#[when(r#"user "{user_id}" is created with email "{email}""#)]
fn create_user(world: &mut CommandWorld, user_id: String, email: String) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": user_id,
        "email": email,
    });
    world.send(Topic::UserCreated, &payload)?;
    Ok(())
}
