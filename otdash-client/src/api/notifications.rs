use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{NotificationCount, PendingNotifications};

use super::ApiClient;
use crate::error::ClientResult;
use crate::transport::ApiRequest;

#[derive(Debug, Serialize)]
struct LimitParam {
    limit: u32,
}

impl ApiClient {
    /// Number of OT entries awaiting a decision.
    pub async fn notification_count(&self) -> ClientResult<u32> {
        let count: NotificationCount = self
            .fetch(ApiRequest::get("/ot/notifications/count"))
            .await?;
        Ok(count.pending)
    }

    pub async fn pending_notifications(&self, limit: u32) -> ClientResult<PendingNotifications> {
        self.fetch(ApiRequest::get("/ot/notifications/pending").query(&LimitParam { limit })?)
            .await
    }
}

/// Pending-approval feed behind the notification bell.
///
/// Fetches closer together than the configured throttle are skipped; the caller
/// keeps showing what it already has.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    client: ApiClient,
    last_fetch: Rc<Cell<Option<DateTime<Utc>>>>,
}

impl NotificationFeed {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            last_fetch: Rc::new(Cell::new(None)),
        }
    }

    pub fn should_fetch(&self, now: DateTime<Utc>) -> bool {
        self.last_fetch
            .get()
            .is_none_or(|last| now - last >= self.client.config().notification_throttle)
    }

    /// `Ok(None)` when the call was throttled.
    pub async fn refresh(&self) -> ClientResult<Option<PendingNotifications>> {
        self.refresh_at(Utc::now()).await
    }

    pub async fn refresh_at(&self, now: DateTime<Utc>) -> ClientResult<Option<PendingNotifications>> {
        if !self.should_fetch(now) {
            return Ok(None);
        }
        self.last_fetch.set(Some(now));
        let limit = self.client.config().pending_notification_limit;
        self.client.pending_notifications(limit).await.map(Some)
    }
}
