//! Chat bubble content for each kind of message.
//!
//! Recipe cards are first described as [`CardLine`]s so the terminal screen
//! and the plain-text printers show the same content.

use std::sync::LazyLock;

use ratatui::text::{Line, Span};
use regex::Regex;

use crate::api::{Information, Ingredient, Instruction, Metric, SearchItem};
use crate::core::message::{CustomItem, DisplayMessage, MessageBody};
use crate::ui::markdown::render_markdown;
use crate::ui::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const LOADER_TEXT: &str = "Looking that up...";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLineKind {
    Title,
    Detail,
    Accent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub kind: CardLineKind,
    pub text: String,
}

impl CardLine {
    fn title(text: impl Into<String>) -> Self {
        Self {
            kind: CardLineKind::Title,
            text: text.into(),
        }
    }

    fn detail(text: impl Into<String>) -> Self {
        Self {
            kind: CardLineKind::Detail,
            text: text.into(),
        }
    }

    fn accent(text: impl Into<String>) -> Self {
        Self {
            kind: CardLineKind::Accent,
            text: text.into(),
        }
    }
}

/// Drop HTML tags and decode the handful of entities recipe summaries use.
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, "");
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Upper-case the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `2`, `0.5`, `1.33`: at most two decimals, no trailing zeros.
pub fn format_quantity(value: f64) -> String {
    let rounded = format!("{value:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_metric(metric: &Metric) -> String {
    if metric.unit.is_empty() {
        format_quantity(metric.value)
    } else {
        format!("{} {}", format_quantity(metric.value), metric.unit)
    }
}

fn recipe_list_lines(item: &SearchItem) -> Vec<CardLine> {
    let mut lines = vec![CardLine::title(capitalize_words(&item.title))];
    lines.push(CardLine::detail(format!("Recipe #{}", item.id)));
    if !item.image.is_empty() {
        lines.push(CardLine::accent(item.image.clone()));
    }
    lines
}

fn recipe_info_lines(info: &Information) -> Vec<CardLine> {
    let mut lines = vec![CardLine::title(capitalize_words(&info.title))];
    if !info.image.is_empty() {
        lines.push(CardLine::accent(info.image.clone()));
    }
    let summary = strip_html(&info.summary);
    let summary = summary.trim();
    if !summary.is_empty() {
        lines.push(CardLine::detail(summary.to_string()));
    }
    lines
}

fn ingredient_lines(ingredients: &[Ingredient]) -> Vec<CardLine> {
    let mut lines = vec![CardLine::title("List of Ingredients:")];
    if ingredients.is_empty() {
        lines.push(CardLine::detail("No ingredients listed."));
    }
    lines.extend(ingredients.iter().enumerate().map(|(index, ingredient)| {
        CardLine::detail(format!(
            "{}. {} - {} ({})",
            index + 1,
            capitalize_words(&ingredient.name),
            format_metric(&ingredient.amount.metric),
            format_metric(&ingredient.amount.us)
        ))
    }));
    lines
}

fn instruction_lines(instructions: &[Instruction]) -> Vec<CardLine> {
    let mut lines = vec![CardLine::title("Instructions:")];
    if instructions.iter().all(|instruction| instruction.steps.is_empty()) {
        lines.push(CardLine::detail("No instructions available."));
        return lines;
    }

    for instruction in instructions {
        if !instruction.name.trim().is_empty() {
            lines.push(CardLine::accent(capitalize_words(instruction.name.trim())));
        }
        for step in &instruction.steps {
            let mut text = format!("Step {}: {}", step.number, step.step.trim());
            if let Some(length) = &step.length {
                text.push_str(&format!(" ({} {})", length.number, length.unit));
            }
            lines.push(CardLine::detail(text));

            if step.equipment.is_empty() {
                lines.push(CardLine::accent("   No equipment required."));
            } else {
                let names: Vec<_> = step.equipment.iter().map(|e| e.name.as_str()).collect();
                lines.push(CardLine::accent(format!("   Equipment: {}", names.join(", "))));
            }

            if step.ingredients.is_empty() {
                lines.push(CardLine::accent("   No ingredients required."));
            } else {
                let names: Vec<_> = step.ingredients.iter().map(|i| i.name.as_str()).collect();
                lines.push(CardLine::accent(format!("   Ingredients: {}", names.join(", "))));
            }
        }
    }
    lines
}

/// Card content for a custom message. Loaders have none.
pub fn card_lines(item: &CustomItem) -> Vec<CardLine> {
    match item {
        CustomItem::RecipeList(item) => recipe_list_lines(item),
        CustomItem::RecipeInfo(info) => recipe_info_lines(info),
        CustomItem::RecipeIngredients(ingredients) => ingredient_lines(ingredients),
        CustomItem::RecipeInstructions(instructions) => instruction_lines(instructions),
        CustomItem::Loader => Vec::new(),
    }
}

fn is_error_text(text: &str) -> bool {
    text.starts_with("Error:") || text.starts_with("Unknown command:")
}

/// Styled lines for one bubble, header included. `tick` drives the loader
/// animation.
pub fn message_lines(message: &DisplayMessage, theme: &Theme, tick: usize) -> Vec<Line<'static>> {
    let is_user = message.author.is_user();
    let (prefix_style, text_style) = if is_user {
        (theme.user_prefix_style, theme.user_text_style)
    } else {
        (theme.bot_prefix_style, theme.bot_text_style)
    };

    let mut lines = vec![Line::from(Span::styled(
        message.author.display_name(),
        prefix_style,
    ))];

    match &message.body {
        MessageBody::Text { text } if is_user => {
            lines.extend(
                text.lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), text_style))),
            );
        }
        MessageBody::Text { text } if is_error_text(text) => {
            lines.push(Line::from(Span::styled(text.clone(), theme.error_text_style)));
        }
        MessageBody::Text { text } => lines.extend(render_markdown(text, text_style)),
        MessageBody::Custom {
            item: CustomItem::Loader,
        } => {
            let frame = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
            lines.push(Line::from(Span::styled(
                format!("{frame} {LOADER_TEXT}"),
                theme.loader_style,
            )));
        }
        MessageBody::Custom { item } => {
            lines.extend(card_lines(item).into_iter().map(|line| {
                let style = match line.kind {
                    CardLineKind::Title => theme.card_title_style,
                    CardLineKind::Detail => theme.card_detail_style,
                    CardLineKind::Accent => theme.card_accent_style,
                };
                Line::from(Span::styled(line.text, style))
            }));
        }
    }

    if is_user {
        for line in &mut lines {
            *line = std::mem::take(line).right_aligned();
        }
    }
    lines
}

/// Unstyled rendering used outside the chat screen.
pub fn message_plain_text(message: &DisplayMessage) -> String {
    let body = match &message.body {
        MessageBody::Text { text } => text.clone(),
        MessageBody::Custom {
            item: CustomItem::Loader,
        } => LOADER_TEXT.to_string(),
        MessageBody::Custom { item } => card_lines(item)
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    format!("{}: {}", message.author.display_name(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Equipment, Length, Step, StepIngredient};
    use crate::core::message::Author;
    use crate::utils::test_utils::{information, ingredient, search_item};

    #[test]
    fn html_is_stripped_from_summaries() {
        assert_eq!(
            strip_html("<b>Pasta</b> takes <a href=\"x\">30 minutes</a> &amp; serves 4."),
            "Pasta takes 30 minutes & serves 4."
        );
    }

    #[test]
    fn titles_are_capitalized() {
        assert_eq!(capitalize_words("red lentil soup"), "Red Lentil Soup");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn quantities_drop_trailing_zeros() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(format_quantity(1.3333), "1.33");
    }

    #[test]
    fn info_card_shows_plain_summary() {
        let lines = card_lines(&CustomItem::RecipeInfo(information(1, "lasagna")));
        assert_eq!(lines[0], CardLine::title("Lasagna"));
        assert!(lines
            .iter()
            .any(|line| line.text == "lasagna is a crowd pleaser."));
    }

    #[test]
    fn ingredient_card_numbers_each_entry() {
        let lines = card_lines(&CustomItem::RecipeIngredients(vec![
            ingredient("flour", 250.0),
            ingredient("brown sugar", 125.0),
        ]));
        assert_eq!(lines[0].text, "List of Ingredients:");
        assert_eq!(lines[1].text, "1. Flour - 250 g (1 cups)");
        assert_eq!(lines[2].text, "2. Brown Sugar - 125 g (0.5 cups)");
    }

    #[test]
    fn instruction_card_lists_steps_with_requirements() {
        let instructions = vec![Instruction {
            name: "for the batter".to_string(),
            steps: vec![Step {
                number: 1,
                step: "Whisk everything.".to_string(),
                length: Some(Length {
                    number: 5,
                    unit: "minutes".to_string(),
                }),
                ingredients: vec![StepIngredient {
                    id: 1,
                    name: "egg".to_string(),
                    image: String::new(),
                }],
                equipment: vec![Equipment {
                    id: 2,
                    name: "whisk".to_string(),
                    image: String::new(),
                    temperature: None,
                }],
            }],
        }];

        let texts: Vec<_> = card_lines(&CustomItem::RecipeInstructions(instructions))
            .into_iter()
            .map(|line| line.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "Instructions:",
                "For The Batter",
                "Step 1: Whisk everything. (5 minutes)",
                "   Equipment: whisk",
                "   Ingredients: egg",
            ]
        );
    }

    #[test]
    fn plain_text_prefixes_the_author() {
        let message = DisplayMessage::custom(
            Author::bot(),
            CustomItem::RecipeList(search_item(9, "apple pie")),
        );
        let text = message_plain_text(&message);
        assert!(text.starts_with("Recipe Bot: Apple Pie\nRecipe #9"));

        assert_eq!(
            message_plain_text(&DisplayMessage::user_text("hi")),
            "Futuristic Labs: hi"
        );
    }

    #[test]
    fn loader_bubble_animates() {
        let theme = Theme::default();
        let loader = DisplayMessage::loader();
        let first = message_lines(&loader, &theme, 0);
        let second = message_lines(&loader, &theme, 1);
        assert_ne!(first[1], second[1]);
    }

    #[test]
    fn user_bubbles_are_right_aligned() {
        let lines = message_lines(&DisplayMessage::user_text("hello"), &Theme::default(), 0);
        assert!(lines
            .iter()
            .all(|line| line.alignment == Some(ratatui::layout::Alignment::Right)));
    }
}
