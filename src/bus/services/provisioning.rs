//! Idempotent creation of the request and response topics.

use crate::bus::{
    domain::Topic,
    ports::{TopicAdmin, TopicAdminError, TopicAdminResult},
};
use tracing::info;

/// Topics touched by [`provision_topics`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Topics created by this run.
    pub created: Vec<String>,
    /// Topics that already existed.
    pub existing: Vec<String>,
}

/// Ensures every request topic, then every response topic, exists.
///
/// A topic created concurrently by another process between the existence
/// check and creation counts as existing.
///
/// # Errors
///
/// Returns the first transport failure; topics handled before it stay
/// created.
pub async fn provision_topics<A>(admin: &A) -> TopicAdminResult<ProvisionReport>
where
    A: TopicAdmin + ?Sized,
{
    let mut report = ProvisionReport::default();
    let names = Topic::ALL
        .into_iter()
        .map(Topic::request_name)
        .chain(Topic::ALL.into_iter().map(Topic::response_name));
    for name in names {
        if admin.topic_exists(name).await? {
            info!(topic = name, "topic already exists");
            report.existing.push(name.to_owned());
            continue;
        }
        match admin.create_topic(name).await {
            Ok(()) => {
                info!(topic = name, "topic created");
                report.created.push(name.to_owned());
            }
            Err(TopicAdminError::AlreadyExists(_)) => {
                info!(topic = name, "topic already exists");
                report.existing.push(name.to_owned());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}
