use tracing::debug;

use crate::commands::{interpret, Intent};
use crate::core::constants::{ambiguous_subject_message, HELP_MESSAGE, UNKNOWN_COMMAND_MESSAGE};
use crate::core::lookup::RecipeApi;
use crate::core::message::DisplayMessage;
use crate::core::projector::project;

/// Interpreter, lookup and projector wired together for one utterance.
pub struct CommandPipeline<A: RecipeApi> {
    api: A,
}

impl<A: RecipeApi> CommandPipeline<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Bot messages answering `utterance`, in display order.
    ///
    /// The utterance is lowercased before interpretation. Help, unknown
    /// and ambiguous commands are answered without a lookup.
    pub async fn respond(&self, utterance: &str) -> Vec<DisplayMessage> {
        let utterance = utterance.to_lowercase();
        let Some(interpretation) = interpret(&utterance) else {
            debug!(utterance = %utterance, "Unrecognised command");
            return vec![DisplayMessage::bot_text(UNKNOWN_COMMAND_MESSAGE)];
        };

        let subject = interpretation
            .query
            .map(|query| query.subject)
            .unwrap_or_default();
        debug!(intent = ?interpretation.intent, subject = %subject, "Interpreted command");

        let result = match interpretation.intent {
            Intent::Help => return vec![DisplayMessage::bot_text(HELP_MESSAGE)],
            Intent::Ambiguous => {
                return vec![DisplayMessage::bot_text(ambiguous_subject_message(&subject))]
            }
            Intent::Search => self.api.search(&subject).await,
            Intent::HowToMake => self.api.instructions(&subject).await,
            Intent::Ingredients => self.api.ingredients(&subject).await,
            Intent::Info => self.api.info(&subject).await,
        };

        project(&result)
    }
}
