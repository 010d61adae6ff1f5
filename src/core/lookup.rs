//! Recipe lookups expressed as tagged [`ApiResult`]s.
//!
//! Detail lookups (information, ingredients, instructions) resolve the
//! recipe name to an id with a one-result search before the detail call.
//! Every failure, including an unresolved name, becomes a fixed
//! per-operation message; the underlying error only goes to the log.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::client::{ApiError, RecipeBackend};
use crate::api::{ApiResult, OperationKind, Payload};
use crate::core::constants::{DEFAULT_SEARCH_RESULTS, FIND_RESULTS};

/// The lookup operations the command pipeline can issue.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn find(&self, name: &str) -> ApiResult;

    async fn search(&self, name: &str) -> ApiResult;

    async fn info(&self, name: &str) -> ApiResult;

    async fn ingredients(&self, name: &str) -> ApiResult;

    async fn instructions(&self, name: &str) -> ApiResult;
}

/// Why a lookup did not produce a payload. Only ever logged.
#[derive(Debug)]
enum LookupFailure {
    FindFailed,
    Unresolved,
    Api(ApiError),
}

impl From<ApiError> for LookupFailure {
    fn from(err: ApiError) -> Self {
        LookupFailure::Api(err)
    }
}

fn failure_message(kind: OperationKind, name: &str) -> String {
    match kind {
        OperationKind::Find => format!("Error: Failed to find recipe {name}"),
        OperationKind::Search => format!("Error: Failed to search {name}"),
        OperationKind::Info => format!("Error: Failed to get information for recipe {name}"),
        OperationKind::Ingredient => {
            format!("Error: Failed to get ingredients for recipe {name}")
        }
        OperationKind::Instruction => {
            format!("Error: Failed to get instructions for recipe {name}")
        }
    }
}

fn settle(kind: OperationKind, name: &str, outcome: Result<Payload, LookupFailure>) -> ApiResult {
    match outcome {
        Ok(payload) => ApiResult::ok(kind, payload),
        Err(LookupFailure::FindFailed) => {
            warn!(operation = kind.as_str(), name, "Could not resolve the recipe name");
            ApiResult::failed(kind, failure_message(kind, name))
        }
        Err(LookupFailure::Unresolved) => {
            warn!(operation = kind.as_str(), name, "No recipe matched the name");
            ApiResult::failed(kind, failure_message(kind, name))
        }
        Err(LookupFailure::Api(err)) => {
            warn!(
                operation = kind.as_str(),
                name,
                timeout = err.is_timeout(),
                "Recipe lookup failed: {err}"
            );
            ApiResult::failed(kind, failure_message(kind, name))
        }
    }
}

pub struct RecipeLookup<B: RecipeBackend> {
    backend: B,
    search_results: u32,
}

impl<B: RecipeBackend> RecipeLookup<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            search_results: DEFAULT_SEARCH_RESULTS,
        }
    }

    /// Number of hits requested by [`RecipeApi::search`].
    pub fn with_search_results(mut self, search_results: u32) -> Self {
        self.search_results = search_results;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn resolve_id(&self, name: &str) -> Result<u64, LookupFailure> {
        let found = self.find(name).await;
        if found.error_message().is_some() {
            return Err(LookupFailure::FindFailed);
        }
        let id = found.first_id().ok_or(LookupFailure::Unresolved)?;
        debug!(name, id, "Resolved recipe name");
        Ok(id)
    }
}

#[async_trait]
impl<B: RecipeBackend> RecipeApi for RecipeLookup<B> {
    async fn find(&self, name: &str) -> ApiResult {
        let outcome = self
            .backend
            .complex_search(name, FIND_RESULTS)
            .await
            .map(|response| Payload::SearchItems(response.results))
            .map_err(LookupFailure::from);
        settle(OperationKind::Find, name, outcome)
    }

    async fn search(&self, name: &str) -> ApiResult {
        let outcome = self
            .backend
            .complex_search(name, self.search_results)
            .await
            .map(|response| Payload::SearchItems(response.results))
            .map_err(LookupFailure::from);
        settle(OperationKind::Search, name, outcome)
    }

    async fn info(&self, name: &str) -> ApiResult {
        let outcome = async {
            let id = self.resolve_id(name).await?;
            Ok::<_, LookupFailure>(Payload::Info(self.backend.information(id).await?))
        }
        .await;
        settle(OperationKind::Info, name, outcome)
    }

    async fn ingredients(&self, name: &str) -> ApiResult {
        let outcome = async {
            let id = self.resolve_id(name).await?;
            Ok::<_, LookupFailure>(Payload::Ingredients(
                self.backend.ingredient_widget(id).await?,
            ))
        }
        .await;
        settle(OperationKind::Ingredient, name, outcome)
    }

    async fn instructions(&self, name: &str) -> ApiResult {
        let outcome = async {
            let id = self.resolve_id(name).await?;
            Ok::<_, LookupFailure>(Payload::Instructions(
                self.backend.analyzed_instructions(id).await?,
            ))
        }
        .await;
        settle(OperationKind::Instruction, name, outcome)
    }
}
