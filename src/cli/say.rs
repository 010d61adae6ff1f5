//! TUI-less "say" command

use std::error::Error;

use crate::api::client::HttpRecipeBackend;
use crate::core::config::data::Config;
use crate::core::lookup::{RecipeApi, RecipeLookup};
use crate::core::pipeline::CommandPipeline;
use crate::ui::bubbles::message_plain_text;

/// Run one utterance and render the replies as plain text, oldest first.
pub async fn render_reply<A: RecipeApi>(pipeline: &CommandPipeline<A>, utterance: &str) -> Vec<String> {
    pipeline
        .respond(utterance)
        .await
        .iter()
        .map(message_plain_text)
        .collect()
}

pub async fn run_say(words: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let utterance = words.join(" ");
    if utterance.trim().is_empty() {
        eprintln!("Usage: recipe-bot say <command>");
        std::process::exit(1);
    }

    let api_key = config.effective_api_key().ok_or(
        "No API key configured. Run 'recipe-bot set api-key <key>' or set SPOONACULAR_API_KEY.",
    )?;
    let backend = HttpRecipeBackend::new(config.effective_base_url(), api_key, config.timeout())?;
    let lookup = RecipeLookup::new(backend).with_search_results(config.effective_search_results());
    let pipeline = CommandPipeline::new(lookup);

    let replies = render_reply(&pipeline, &utterance).await;
    println!("{}", replies.join("\n\n"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{HELP_MESSAGE, UNKNOWN_COMMAND_MESSAGE};
    use crate::utils::test_utils::FakeApi;

    #[tokio::test]
    async fn help_is_printed_with_the_bot_label() {
        let pipeline = CommandPipeline::new(FakeApi::default());
        let lines = render_reply(&pipeline, "help").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(HELP_MESSAGE));
        assert!(!lines[0].starts_with(HELP_MESSAGE));
    }

    #[tokio::test]
    async fn unknown_command_prints_the_fallback() {
        let pipeline = CommandPipeline::new(FakeApi::default());
        let lines = render_reply(&pipeline, "tell me a joke").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(UNKNOWN_COMMAND_MESSAGE));
        assert!(pipeline.api().calls().is_empty());
    }

    #[tokio::test]
    async fn info_reply_lists_the_card_title() {
        let pipeline = CommandPipeline::new(FakeApi::default());
        let lines = render_reply(&pipeline, "lasagna recipe").await;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Recipe Bot: "));
        assert!(lines[0].to_lowercase().contains("lasagna"));
    }
}
