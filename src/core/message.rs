use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{Information, Ingredient, Instruction, SearchItem};

const USER_ID: &str = "06c33e8b-e835-4736-80f4-63f44b66666c";
const BOT_ID: &str = "06c33e8b-e835-5736-80f4-63f44b66666c";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn user() -> Self {
        Self {
            id: USER_ID.to_string(),
            first_name: "Futuristic".to_string(),
            last_name: "Labs".to_string(),
        }
    }

    pub fn bot() -> Self {
        Self {
            id: BOT_ID.to_string(),
            first_name: "Recipe".to_string(),
            last_name: "Bot".to_string(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.id == USER_ID
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// How a custom message is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    RecipeList,
    RecipeInfo,
    RecipeIngredients,
    RecipeInstructions,
    Loader,
}

/// Structured payload of a custom message. Serialized as
/// `{"kind": "...", "data": ...}` so persisted records stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CustomItem {
    RecipeList(SearchItem),
    RecipeInfo(Information),
    RecipeIngredients(Vec<Ingredient>),
    RecipeInstructions(Vec<Instruction>),
    Loader,
}

impl CustomItem {
    pub fn presentation_kind(&self) -> PresentationKind {
        match self {
            CustomItem::RecipeList(_) => PresentationKind::RecipeList,
            CustomItem::RecipeInfo(_) => PresentationKind::RecipeInfo,
            CustomItem::RecipeIngredients(_) => PresentationKind::RecipeIngredients,
            CustomItem::RecipeInstructions(_) => PresentationKind::RecipeInstructions,
            CustomItem::Loader => PresentationKind::Loader,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    Text { text: String },
    Custom { item: CustomItem },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMessage {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub author: Author,
    pub body: MessageBody,
}

impl DisplayMessage {
    pub fn new(author: Author, body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().timestamp_millis(),
            author,
            body,
        }
    }

    pub fn text(author: Author, text: impl Into<String>) -> Self {
        Self::new(author, MessageBody::Text { text: text.into() })
    }

    pub fn custom(author: Author, item: CustomItem) -> Self {
        Self::new(author, MessageBody::Custom { item })
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::text(Author::user(), text)
    }

    pub fn bot_text(text: impl Into<String>) -> Self {
        Self::text(Author::bot(), text)
    }

    pub fn loader() -> Self {
        Self::custom(Author::bot(), CustomItem::Loader)
    }

    pub fn is_loader(&self) -> bool {
        matches!(
            &self.body,
            MessageBody::Custom {
                item: CustomItem::Loader
            }
        )
    }

    pub fn presentation_kind(&self) -> Option<PresentationKind> {
        match &self.body {
            MessageBody::Text { .. } => None,
            MessageBody::Custom { item } => Some(item.presentation_kind()),
        }
    }

    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text { text } => Some(text),
            MessageBody::Custom { .. } => None,
        }
    }

    /// Equality that ignores the generated id and timestamp.
    pub fn same_content(&self, other: &DisplayMessage) -> bool {
        self.author == other.author && self.body == other.body
    }
}
