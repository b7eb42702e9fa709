//! Plumbing shared by the user, project and task handlers.
//!
//! Handlers turn validation and business-rule failures into responses and
//! only return [`HandlerError`] for infrastructure failures, which the
//! dispatcher converts into a negative acknowledgement.

use crate::{
    bus::{
        domain::{CommandEnvelope, ErrorCode, Response, Topic},
        ports::ResponsePublisher,
    },
    store::StoreError,
    validation::ValidationError,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

/// Infrastructure failures raised while handling a command.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for handler operations; `Ok` carries the published response.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Publishes `response` on `topic`'s response topic and returns it.
///
/// A failed publish is logged and otherwise ignored: the command's effect
/// has already been applied and nothing the handler can do will recover it.
pub async fn publish_response<P>(publisher: &P, topic: Topic, response: Response) -> Response
where
    P: ResponsePublisher + ?Sized,
{
    if let Err(err) = publisher.publish(topic, &response).await {
        error!(
            topic = topic.response_name(),
            error = %err,
            "failed to publish response"
        );
    }
    response
}

/// Publishes the `invalidMessageData` response for a payload that failed
/// its schema.
pub async fn reject_invalid<P>(
    publisher: &P,
    topic: Topic,
    payload: &Value,
    err: &ValidationError,
    message: &str,
) -> Response
where
    P: ResponsePublisher + ?Sized,
{
    warn!(error = %err, "{message}");
    let envelope = CommandEnvelope::lenient(payload);
    let response = Response::failure(&envelope, ErrorCode::InvalidMessageData, message);
    publish_response(publisher, topic, response).await
}
