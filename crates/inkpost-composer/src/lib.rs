//! # inkpost-composer
//!
//! The comment composer built on the [`inkpost`] editor: the persisted
//! [`SerializedComment`] record, the content store contract
//! ([`CommentStore`] for writes, [`CommentFeed`] for reads) with an
//! in-memory [`MemoryStore`], and the [`Composer`] that guards submission.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use inkpost_composer::{CommentFeed, Composer, MemoryStore};
//!
//! # tokio_test_block(async {
//! let store = Arc::new(MemoryStore::new());
//! let composer = Composer::new("hello-world", "Hello World", Arc::clone(&store));
//!
//! composer.edit(|editor| {
//!     let caret = editor.insert_text("Great post ", None);
//!     editor.insert_catalog_embed(3, Some(&caret.into()));
//! });
//! composer.submit().await.unwrap();
//!
//! let feed = store.visible_comments("hello-world").await;
//! assert_eq!(feed[0].comment.author, "訪客");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

mod composer;
mod error;
mod record;
mod store;

pub use composer::{Composer, ComposerConfig};
pub use error::{StoreWriteError, SubmitError, SUBMIT_FAILED_MESSAGE};
pub use record::{DocumentId, SerializedComment, DEFAULT_AUTHOR};
pub use store::{CommentFeed, CommentStore, MemoryStore, StoreEvent, StoredComment};
