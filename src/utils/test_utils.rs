use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::client::{ApiError, RecipeBackend};
use crate::api::{
    Amount, ApiResult, Information, Ingredient, Instruction, Metric, OperationKind, Payload,
    SearchItem, SearchResponse, Step,
};
use crate::core::lookup::RecipeApi;

pub fn search_item(id: u64, title: &str) -> SearchItem {
    SearchItem {
        id,
        title: title.to_string(),
        image: format!("https://img.example/{id}.jpg"),
        image_type: "jpg".to_string(),
    }
}

pub fn information(id: u64, title: &str) -> Information {
    Information {
        id,
        title: title.to_string(),
        image: format!("https://img.example/{id}.jpg"),
        summary: format!("<b>{title}</b> is a crowd pleaser."),
    }
}

pub fn ingredient(name: &str, grams: f64) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        image: format!("{name}.png"),
        amount: Amount {
            metric: Metric {
                unit: "g".to_string(),
                value: grams,
            },
            us: Metric {
                unit: "cups".to_string(),
                value: grams / 250.0,
            },
        },
    }
}

pub fn instruction(steps: &[&str]) -> Instruction {
    Instruction {
        name: String::new(),
        steps: steps
            .iter()
            .enumerate()
            .map(|(index, text)| Step {
                number: index as u32 + 1,
                step: text.to_string(),
                length: None,
                ingredients: Vec::new(),
                equipment: Vec::new(),
            })
            .collect(),
    }
}

/// Canned failure used where a backend call should not succeed.
pub fn decode_error() -> ApiError {
    ApiError::Decode(serde_json::from_str::<u64>("\"nope\"").unwrap_err())
}

/// In-memory backend that counts each endpoint call.
///
/// `search_results` answers every search; `None` makes the search fail.
/// The detail endpoints answer from the remaining fields, and a `None`
/// there fails the call.
#[derive(Default)]
pub struct FakeBackend {
    pub search_results: Option<Vec<SearchItem>>,
    pub information: Option<Information>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<Instruction>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub last_search: Mutex<Option<(String, u32)>>,
    pub last_detail_id: Mutex<Option<u64>>,
}

impl FakeBackend {
    pub fn with_search(results: Vec<SearchItem>) -> Self {
        Self {
            search_results: Some(results),
            ..Self::default()
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<(String, u32)> {
        self.last_search.lock().unwrap().clone()
    }

    pub fn last_detail_id(&self) -> Option<u64> {
        *self.last_detail_id.lock().unwrap()
    }

    fn record_detail(&self, id: u64) {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_detail_id.lock().unwrap() = Some(id);
    }
}

#[async_trait]
impl RecipeBackend for FakeBackend {
    async fn complex_search(&self, query: &str, number: u32) -> Result<SearchResponse, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some((query.to_string(), number));
        let mut results = self.search_results.clone().ok_or_else(decode_error)?;
        results.truncate(number as usize);
        Ok(SearchResponse { results })
    }

    async fn information(&self, id: u64) -> Result<Information, ApiError> {
        self.record_detail(id);
        self.information.clone().ok_or_else(decode_error)
    }

    async fn ingredient_widget(&self, id: u64) -> Result<Vec<Ingredient>, ApiError> {
        self.record_detail(id);
        self.ingredients.clone().ok_or_else(decode_error)
    }

    async fn analyzed_instructions(&self, id: u64) -> Result<Vec<Instruction>, ApiError> {
        self.record_detail(id);
        self.instructions.clone().ok_or_else(decode_error)
    }
}

/// Records each lookup as `(operation, name)` and answers every call with
/// an empty success of the matching kind.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<(OperationKind, String)>>,
    pub search_results: Vec<SearchItem>,
    /// Held before answering, so tests can keep a lookup in flight.
    pub gate: Option<std::sync::Arc<tokio::sync::Notify>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<(OperationKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, kind: OperationKind, name: &str, payload: Payload) -> ApiResult {
        self.calls.lock().unwrap().push((kind, name.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        ApiResult::ok(kind, payload)
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn find(&self, name: &str) -> ApiResult {
        self.answer(OperationKind::Find, name, Payload::SearchItems(Vec::new()))
            .await
    }

    async fn search(&self, name: &str) -> ApiResult {
        self.answer(
            OperationKind::Search,
            name,
            Payload::SearchItems(self.search_results.clone()),
        )
        .await
    }

    async fn info(&self, name: &str) -> ApiResult {
        self.answer(OperationKind::Info, name, Payload::Info(information(1, name)))
            .await
    }

    async fn ingredients(&self, name: &str) -> ApiResult {
        self.answer(OperationKind::Ingredient, name, Payload::Ingredients(Vec::new()))
            .await
    }

    async fn instructions(&self, name: &str) -> ApiResult {
        self.answer(OperationKind::Instruction, name, Payload::Instructions(Vec::new()))
            .await
    }
}
