use crate::api::{ApiResult, OperationKind, Payload};
use crate::core::message::{Author, CustomItem, DisplayMessage};

/// Turn a lookup result into bot messages, in display order.
///
/// Errors become a single text message. Search results fan out into one
/// message per hit; every other payload is wrapped whole. A bare `Find`
/// result has no presentation and yields nothing.
pub fn project(result: &ApiResult) -> Vec<DisplayMessage> {
    let payload = match &result.outcome {
        Err(message) => return vec![DisplayMessage::bot_text(message.clone())],
        Ok(payload) => payload,
    };

    match (result.kind, payload) {
        (OperationKind::Search, Payload::SearchItems(items)) => items
            .iter()
            .map(|item| bot(CustomItem::RecipeList(item.clone())))
            .collect(),
        (OperationKind::Info, Payload::Info(info)) => {
            vec![bot(CustomItem::RecipeInfo(info.clone()))]
        }
        (OperationKind::Ingredient, Payload::Ingredients(ingredients)) => {
            vec![bot(CustomItem::RecipeIngredients(ingredients.clone()))]
        }
        (OperationKind::Instruction, Payload::Instructions(instructions)) => {
            vec![bot(CustomItem::RecipeInstructions(instructions.clone()))]
        }
        (kind, _) => {
            tracing::debug!(operation = kind.as_str(), "Result has no presentation");
            Vec::new()
        }
    }
}

fn bot(item: CustomItem) -> DisplayMessage {
    DisplayMessage::custom(Author::bot(), item)
}
