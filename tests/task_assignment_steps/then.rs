//! Then steps for command flow BDD scenarios.

use super::world::{CommandWorld, run_async};
use rstest_bdd_macros::then;
use skillsync::{
    bus::domain::{Acknowledgement, ErrorCode},
    store::records::fetch,
    task::domain::TaskRecord,
    user::domain::UserRecord,
};

fn task(world: &CommandWorld, task_id: &str) -> Result<TaskRecord, eyre::Report> {
    run_async(fetch::<TaskRecord, _>(&*world.store, task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} is not stored"))
}

#[then("the response reports success")]
fn response_succeeded(world: &CommandWorld) -> Result<(), eyre::Report> {
    let published = world.last_response()?;
    if !published.response.status {
        return Err(eyre::eyre!(
            "expected success, got {:?}: {}",
            published.response.error_code,
            published.response.message
        ));
    }
    Ok(())
}

#[then(r#"the response fails with "{code}""#)]
fn response_failed_with(world: &CommandWorld, code: String) -> Result<(), eyre::Report> {
    let published = world.last_response()?;
    let reported = published.response.error_code.map(ErrorCode::as_str);
    if published.response.status || reported != Some(code.as_str()) {
        return Err(eyre::eyre!("expected failure {code}, got {reported:?}"));
    }
    if world.last_acknowledgement != Some(Acknowledgement::Ack) {
        return Err(eyre::eyre!("business failures must be acknowledged"));
    }
    Ok(())
}

#[then(r#"task "{task_id}" has members "{member_id}""#)]
fn task_has_member(
    world: &CommandWorld,
    task_id: String,
    member_id: String,
) -> Result<(), eyre::Report> {
    let members = task(world, &task_id)?.task_members;
    if members != [member_id.clone()] {
        return Err(eyre::eyre!("expected members [{member_id}], found {members:?}"));
    }
    Ok(())
}

#[then(r#"task "{task_id}" has no members"#)]
fn task_has_no_members(world: &CommandWorld, task_id: String) -> Result<(), eyre::Report> {
    let members = task(world, &task_id)?.task_members;
    if !members.is_empty() {
        return Err(eyre::eyre!("expected no members, found {members:?}"));
    }
    Ok(())
}

#[then(r#"task "{task_id}" has status "{status}""#)]
fn task_has_status(
    world: &CommandWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let stored = task(world, &task_id)?;
    if stored.status.as_str() != status {
        return Err(eyre::eyre!("expected status {status}, found {}", stored.status));
    }
    if stored.completed_by.is_none() || stored.complete_at.is_none() {
        return Err(eyre::eyre!("completion details were not recorded"));
    }
    Ok(())
}

#[then(r#"user "{user_id}" still has email "{email}""#)]
fn user_has_email(world: &CommandWorld, user_id: String, email: String) -> Result<(), eyre::Report> {
    let user = run_async(fetch::<UserRecord, _>(&*world.store, &user_id))?
        .ok_or_else(|| eyre::eyre!("user {user_id} is not stored"))?;
    if user.email != email {
        return Err(eyre::eyre!("expected email {email}, found {}", user.email));
    }
    Ok(())
}
