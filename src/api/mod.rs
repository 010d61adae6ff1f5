//! Recipe API payloads and the tagged lookup result shared by the core.
//!
//! The structs mirror the JSON the recipe service returns. Unknown fields
//! are ignored, and fields the service sometimes omits default to empty so
//! a sparse record still decodes.

use serde::{Deserialize, Serialize};

pub mod client;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "imageType", default)]
    pub image_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Information {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub metric: Metric,
    pub us: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientResponse {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub number: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepIngredient {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub number: u32,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: u32,
    pub step: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Length>,
    #[serde(default)]
    pub ingredients: Vec<StepIngredient>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Which lookup produced an [`ApiResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Find,
    Info,
    Search,
    Ingredient,
    Instruction,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Find => "find",
            OperationKind::Info => "information",
            OperationKind::Search => "search",
            OperationKind::Ingredient => "ingredient",
            OperationKind::Instruction => "instruction",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    SearchItems(Vec<SearchItem>),
    Info(Information),
    Ingredients(Vec<Ingredient>),
    Instructions(Vec<Instruction>),
}

/// Outcome of one lookup operation, tagged with the operation kind.
///
/// Exactly one of payload and error message is present; the `Result`
/// carries that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub kind: OperationKind,
    pub outcome: Result<Payload, String>,
}

impl ApiResult {
    pub fn ok(kind: OperationKind, payload: Payload) -> Self {
        Self {
            kind,
            outcome: Ok(payload),
        }
    }

    pub fn failed(kind: OperationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            outcome: Err(message.into()),
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.outcome.as_ref().ok()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    /// Identifier of the first search hit, used by two-step resolution.
    pub fn first_id(&self) -> Option<u64> {
        match self.payload()? {
            Payload::SearchItems(items) => items.first().map(|item| item.id),
            _ => None,
        }
    }
}
