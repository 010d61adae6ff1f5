//! The conversation shown on the chat screen.
//!
//! Messages are kept newest-first and written to the store after every
//! change. Each submitted command opens a new generation; results from an
//! older generation are dropped when they arrive.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::constants::WELCOME_MESSAGE;
use crate::core::message::DisplayMessage;
use crate::core::store::MessageStore;

pub struct Conversation {
    messages: Vec<DisplayMessage>,
    store: Box<dyn MessageStore>,
    current_generation: u64,
    cancel_token: Option<CancellationToken>,
    loader_id: Option<String>,
}

impl Conversation {
    /// Load the stored conversation, greeting the user when it is empty.
    /// An unreadable store starts a fresh conversation.
    pub fn load(store: Box<dyn MessageStore>) -> Self {
        let messages = store.get().unwrap_or_else(|err| {
            warn!("Starting a fresh conversation: {err}");
            Vec::new()
        });
        let mut conversation = Self {
            messages,
            store,
            current_generation: 0,
            cancel_token: None,
            loader_id: None,
        };
        if conversation.messages.is_empty() {
            conversation.add_message(DisplayMessage::bot_text(WELCOME_MESSAGE));
        }
        conversation
    }

    /// Newest first.
    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    /// Oldest first, the order messages are drawn top to bottom.
    pub fn chronological(&self) -> impl Iterator<Item = &DisplayMessage> {
        self.messages.iter().rev()
    }

    pub fn add_message(&mut self, message: DisplayMessage) {
        self.messages.insert(0, message);
        self.persist();
    }

    pub fn is_current_generation(&self, generation: u64) -> bool {
        generation == self.current_generation
    }

    pub fn is_pending(&self) -> bool {
        self.loader_id.is_some()
    }

    /// Record the user's text and open a new generation for its lookup.
    ///
    /// Any lookup still in flight is cancelled and its loader removed, so at
    /// most one loader is ever shown.
    pub fn begin_lookup(&mut self, user_text: &str) -> (CancellationToken, u64) {
        if let Some(token) = self.cancel_token.take() {
            debug!(generation = self.current_generation, "Superseding lookup");
            token.cancel();
        }
        if let Some(loader_id) = self.loader_id.take() {
            self.messages.retain(|message| message.id != loader_id);
        }

        self.messages.insert(0, DisplayMessage::user_text(user_text));
        let loader = DisplayMessage::loader();
        self.loader_id = Some(loader.id.clone());
        self.messages.insert(0, loader);
        self.persist();

        self.current_generation = self.current_generation.wrapping_add(1);
        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());
        (token, self.current_generation)
    }

    /// Replace the loader with the lookup's messages. Returns `false` and
    /// leaves the conversation untouched when `generation` is stale.
    pub fn apply_result(&mut self, generation: u64, messages: Vec<DisplayMessage>) -> bool {
        if !self.is_current_generation(generation) {
            debug!(
                generation,
                current = self.current_generation,
                "Dropping stale lookup result"
            );
            return false;
        }

        self.cancel_token = None;
        if let Some(loader_id) = self.loader_id.take() {
            self.messages.retain(|message| message.id != loader_id);
        }
        for message in messages {
            self.messages.insert(0, message);
        }
        self.persist();
        true
    }

    /// Cancel whatever is in flight, for shutdown.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        if let Some(loader_id) = self.loader_id.take() {
            self.messages.retain(|message| message.id != loader_id);
        }
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        self.messages.clear();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.set(&self.messages) {
            warn!("Failed to persist conversation: {err}");
        }
    }
}
