//! Behaviour tests for task assignment, completion and duplicate creation,
//! driven through the dispatcher.

#[path = "task_assignment_steps/mod.rs"]
mod task_assignment_steps_defs;

use rstest_bdd_macros::scenario;
use task_assignment_steps_defs::world::{CommandWorld, world};

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Assign a project member to a task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assign_project_member(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Refuse to assign a user outside the project"
)]
#[tokio::test(flavor = "multi_thread")]
async fn refuse_non_member_assignment(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Complete a task only once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn complete_task_once(world: CommandWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_assignment.feature",
    name = "Refuse a second user with the same id"
)]
#[tokio::test(flavor = "multi_thread")]
async fn refuse_duplicate_user(world: CommandWorld) {
    let _ = world;
}
