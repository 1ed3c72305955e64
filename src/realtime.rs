//! Change-event dispatcher and SSE feed.
//!
//! One broadcast channel per process carries every domain change; mutating
//! handlers publish after a successful write and clients subscribe through
//! a single SSE endpoint, optionally filtered to one entity. The feed is a
//! refresh trigger, not a durable log: a slow consumer that lags past the
//! channel capacity misses events and should simply re-fetch.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Domain tables a change event can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Profiles,
    UserRoles,
    Batches,
    Students,
    Classes,
    Attendance,
    Fees,
    Tests,
    TestMarks,
    Tasks,
    TaskSubmissions,
    ClassNotes,
    Events,
    EventRegistrations,
    Notifications,
    Testimonials,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::UserRoles => "user_roles",
            Self::Batches => "batches",
            Self::Students => "students",
            Self::Classes => "classes",
            Self::Attendance => "attendance",
            Self::Fees => "fees",
            Self::Tests => "tests",
            Self::TestMarks => "test_marks",
            Self::Tasks => "tasks",
            Self::TaskSubmissions => "task_submissions",
            Self::ClassNotes => "class_notes",
            Self::Events => "events",
            Self::EventRegistrations => "event_registrations",
            Self::Notifications => "notifications",
            Self::Testimonials => "testimonials",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

/// A single change notification. Carries no row payload; subscribers
/// re-fetch whatever view they are rendering.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub op: ChangeOp,
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
}

const FEED_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a change. A send error only means nobody is subscribed.
    pub fn publish(&self, entity: EntityKind, op: ChangeOp, id: Uuid) {
        let _ = self.tx.send(ChangeEvent { entity, op, id });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(FEED_CAPACITY)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RealtimeParams {
    /// Restrict the stream to one entity; omitted means every entity.
    pub entity: Option<EntityKind>,
}

/// Subscribe to the change feed over SSE.
#[utoipa::path(
    get,
    path = "/api/realtime",
    params(
        ("entity" = Option<String>, Query, description = "Entity to filter on, e.g. 'attendance'")
    ),
    responses(
        (status = 200, description = "SSE stream of change events"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Realtime"
)]
pub async fn stream_changes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<RealtimeParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.changes.subscribe();
    let filter = params.entity;

    let stream = BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Ok(event) if filter.is_none() || filter == Some(event.entity) => Event::default()
            .event(event.entity.as_str())
            .json_data(&event)
            .ok()
            .map(Ok::<_, Infallible>),
        // Dropped (lagged) messages and filtered entities are skipped.
        _ => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let feed = ChangeFeed::default();
        let mut rx = feed.subscribe();

        let id = Uuid::new_v4();
        feed.publish(EntityKind::Attendance, ChangeOp::Updated, id);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.entity, EntityKind::Attendance);
        assert_eq!(event.op, ChangeOp::Updated);
        assert_eq!(event.id, id);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let feed = ChangeFeed::default();
        feed.publish(EntityKind::Batches, ChangeOp::Created, Uuid::new_v4());
    }

    #[test]
    fn entity_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EntityKind::TaskSubmissions).unwrap();
        assert_eq!(json, r#""task_submissions""#);
    }
}
