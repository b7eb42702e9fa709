//! Given steps for command flow BDD scenarios.

use super::world::CommandWorld;
use rstest_bdd_macros::given;
use serde_json::json;
use skillsync::bus::domain::Topic;

fn expect_success(
    world: &mut CommandWorld,
    topic: Topic,
    payload: &serde_json::Value,
) -> Result<(), eyre::Report> {
    let published = world.send(topic, payload)?;
    if !published.response.status {
        return Err(eyre::eyre!(
            "setup command on {topic} failed: {}",
            published.response.message
        ));
    }
    Ok(())
}

#[given(r#"a project "{project_id}" with member "{member_id}""#)]
fn project_with_member(
    world: &mut CommandWorld,
    project_id: String,
    member_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": project_id,
        "name": "Scenario project",
        "members": [member_id],
    });
    expect_success(world, Topic::ProjectCreated, &payload)
}

#[given(r#"a task "{task_id}" in project "{project_id}""#)]
fn task_in_project(
    world: &mut CommandWorld,
    task_id: String,
    project_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": task_id,
        "projectId": project_id,
        "name": "Scenario task",
    });
    expect_success(world, Topic::TaskCreated, &payload)
}

#[given(r#""{member_id}" has been assigned to task "{task_id}""#)]
fn member_assigned(
    world: &mut CommandWorld,
    member_id: String,
    task_id: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": task_id,
        "memberId": member_id,
    });
    expect_success(world, Topic::TaskAssigned, &payload)
}

#[given(r#"a user "{user_id}" with email "{email}""#)]
fn user_with_email(
    world: &mut CommandWorld,
    user_id: String,
    email: String,
) -> Result<(), eyre::Report> {
    let payload = json!({
        "correlationKey": world.next_correlation_key(),
        "id": user_id,
        "email": email,
    });
    expect_success(world, Topic::UserCreated, &payload)
}
