//! Content store contract and an in-memory implementation.

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::info;

use crate::error::StoreWriteError;
use crate::record::{DocumentId, SerializedComment};

const EVENT_CAPACITY: usize = 100;

/// A comment as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredComment {
    pub id: DocumentId,
    #[serde(flatten)]
    pub comment: SerializedComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(StoredComment),
    Deleted(DocumentId),
}

/// Write side of the content store
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(&self, record: SerializedComment) -> Result<DocumentId, StoreWriteError>;
}

/// Read and admin side of the content store
#[async_trait]
pub trait CommentFeed: Send + Sync {
    /// Visible comments of one post, newest first
    async fn visible_comments(&self, post_id: &str) -> Vec<StoredComment>;

    /// Every comment, newest first
    async fn all_comments(&self) -> Vec<StoredComment>;

    async fn delete_comment(&self, id: &DocumentId) -> Result<(), StoreWriteError>;

    /// Live changes from now on
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// Process-local store; assigns ids and creation times
pub struct MemoryStore {
    comments: RwLock<IndexMap<DocumentId, StoredComment>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            comments: RwLock::new(IndexMap::new()),
            events,
        }
    }

    pub async fn len(&self) -> usize {
        self.comments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.comments.read().await.is_empty()
    }

    pub async fn get(&self, id: &DocumentId) -> Option<StoredComment> {
        self.comments.read().await.get(id).cloned()
    }

    /// Stored comments matching `keep`, newest first. Equal timestamps keep
    /// the later write first.
    async fn newest_first<F>(&self, keep: F) -> Vec<StoredComment>
    where
        F: Fn(&StoredComment) -> bool + Send,
    {
        let comments = self.comments.read().await;
        let mut out: Vec<StoredComment> = comments.values().rev().filter(|c| keep(c)).cloned().collect();
        out.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
        out
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, mut record: SerializedComment) -> Result<DocumentId, StoreWriteError> {
        let id = DocumentId::generate();
        record.created_at = Some(Utc::now());

        let stored = StoredComment {
            id: id.clone(),
            comment: record,
        };
        self.comments.write().await.insert(id.clone(), stored.clone());

        info!(id = %id, post_id = %stored.comment.post_id, "comment created");
        // No subscribers is fine
        let _ = self.events.send(StoreEvent::Created(stored));
        Ok(id)
    }
}

#[async_trait]
impl CommentFeed for MemoryStore {
    async fn visible_comments(&self, post_id: &str) -> Vec<StoredComment> {
        self.newest_first(|c| c.comment.post_id == post_id && c.comment.is_visible)
            .await
    }

    async fn all_comments(&self) -> Vec<StoredComment> {
        self.newest_first(|_| true).await
    }

    async fn delete_comment(&self, id: &DocumentId) -> Result<(), StoreWriteError> {
        let removed = self.comments.write().await.shift_remove(id);
        if removed.is_none() {
            return Err(StoreWriteError::NotFound(id.clone()));
        }

        info!(id = %id, "comment deleted");
        let _ = self.events.send(StoreEvent::Deleted(id.clone()));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
