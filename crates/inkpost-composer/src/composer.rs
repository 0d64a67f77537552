//! The comment composer and its submit state machine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use inkpost::Editor;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{StoreWriteError, SubmitError, SUBMIT_FAILED_MESSAGE};
use crate::record::{DocumentId, SerializedComment, DEFAULT_AUTHOR};
use crate::store::CommentStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Author recorded when the name field is blank
    pub default_author: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

#[derive(Default)]
struct ComposerState {
    editor: Editor,
    name: String,
    email: String,
    website: String,
    submitting: bool,
    last_error: Option<&'static str>,
}

/// Composes one comment for one post and submits it to a store.
///
/// At most one submit is in flight. A failed submit keeps the content for
/// another try; a successful one clears it unless it was edited while the
/// write was pending.
pub struct Composer<S> {
    post_id: String,
    post_title: String,
    config: ComposerConfig,
    state: Arc<Mutex<ComposerState>>,
    store: Arc<S>,
}

impl<S: CommentStore + 'static> Composer<S> {
    pub fn new(post_id: impl Into<String>, post_title: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            post_id: post_id.into(),
            post_title: post_title.into(),
            config: ComposerConfig::default(),
            state: Arc::new(Mutex::new(ComposerState::default())),
            store,
        }
    }

    pub fn with_config(mut self, config: ComposerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the editor, e.g. one with a custom serializer
    pub fn with_editor(self, editor: Editor) -> Self {
        lock(&self.state).editor = editor;
        self
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn post_title(&self) -> &str {
        &self.post_title
    }

    /// Run `f` against the editor
    pub fn edit<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> R {
        f(&mut lock(&self.state).editor)
    }

    pub fn markdown(&self) -> String {
        lock(&self.state).editor.markdown().to_string()
    }

    pub fn set_name(&self, name: &str) {
        lock(&self.state).name = name.to_string();
    }

    pub fn set_email(&self, email: &str) {
        lock(&self.state).email = email.to_string();
    }

    pub fn set_website(&self, website: &str) {
        lock(&self.state).website = website.to_string();
    }

    pub fn name(&self) -> String {
        lock(&self.state).name.clone()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).submitting
    }

    /// Submit is enabled when there is content and nothing is in flight
    pub fn can_submit(&self) -> bool {
        let state = lock(&self.state);
        !state.submitting && !state.editor.is_empty()
    }

    /// Message from the last failed submit, cleared by the next attempt
    pub fn last_error(&self) -> Option<&'static str> {
        lock(&self.state).last_error
    }

    /// Write the comment and wait for the store.
    ///
    /// Dropping the returned future before the store answers leaves the
    /// content in place and re-enables submit.
    pub async fn submit(&self) -> Result<DocumentId, SubmitError> {
        let record = self.begin_submit()?;
        let in_flight = InFlight::new(&self.state);
        let submitted = record.content.clone();

        let result = self.store.create_comment(record).await;
        in_flight.settle(&submitted, &result);
        Ok(result?)
    }

    /// Write the comment on a background task.
    ///
    /// The task keeps only a weak handle on the composer; if the composer is
    /// gone when the write completes, the outcome is dropped and the task
    /// yields `None`. Aborting the task re-enables submit.
    pub fn submit_detached(
        &self,
    ) -> Result<JoinHandle<Option<Result<DocumentId, SubmitError>>>, SubmitError> {
        let record = self.begin_submit()?;
        let in_flight = InFlight::new(&self.state);
        let store = Arc::clone(&self.store);

        Ok(tokio::spawn(async move {
            let submitted = record.content.clone();
            let result = store.create_comment(record).await;

            if in_flight.settle(&submitted, &result) {
                Some(result.map_err(SubmitError::from))
            } else {
                debug!("composer dropped before the write completed, result discarded");
                None
            }
        }))
    }

    fn begin_submit(&self) -> Result<SerializedComment, SubmitError> {
        let mut state = lock(&self.state);

        if state.submitting {
            return Err(SubmitError::InFlight);
        }
        if state.editor.is_empty() {
            return Err(SubmitError::Empty);
        }

        state.submitting = true;
        state.last_error = None;

        let record = SerializedComment::new(&self.post_id, &self.post_title, state.editor.markdown())
            .with_author(&self.config.default_author)
            .with_author(&state.name)
            .with_email(&state.email)
            .with_website(&state.website);

        info!(post_id = %self.post_id, author = %record.author, "submitting comment");
        Ok(record)
    }
}

/// One pending write. Settling applies the store's answer; dropping it
/// unsettled (a cancelled submit) only clears the in-flight flag.
struct InFlight {
    state: Weak<Mutex<ComposerState>>,
    settled: bool,
}

impl InFlight {
    fn new(state: &Arc<Mutex<ComposerState>>) -> Self {
        Self {
            state: Arc::downgrade(state),
            settled: false,
        }
    }

    /// `false` when the composer is gone
    fn settle(mut self, submitted: &str, result: &Result<DocumentId, StoreWriteError>) -> bool {
        self.settled = true;
        match self.state.upgrade() {
            Some(state) => {
                finish(&state, submitted, result);
                true
            }
            None => false,
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            let mut state = lock(&state);
            if state.submitting {
                debug!("submit ended without an outcome, input re-enabled");
                state.submitting = false;
            }
        }
    }
}

fn finish(
    state: &Mutex<ComposerState>,
    submitted: &str,
    result: &Result<DocumentId, StoreWriteError>,
) {
    let mut state = lock(state);
    state.submitting = false;

    match result {
        Ok(id) if state.editor.markdown() == submitted => {
            state.editor.clear();
            state.name.clear();
            info!(id = %id, "comment submitted");
        }
        Ok(id) => {
            info!(id = %id, "comment submitted, newer edits kept");
        }
        Err(err) => {
            state.last_error = Some(SUBMIT_FAILED_MESSAGE);
            warn!(error = %err, "comment submit failed, content kept");
        }
    }
}

fn lock(state: &Mutex<ComposerState>) -> MutexGuard<'_, ComposerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
