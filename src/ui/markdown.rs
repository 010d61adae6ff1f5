//! Minimal Markdown rendering for bot text bubbles.
//!
//! Bot texts only use paragraphs, emphasis, headings and (nested) lists,
//! so that is all this renders. Lines are not wrapped here; the message
//! area wraps them.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const LIST_INDENT: &str = "   ";

pub fn render_markdown(content: &str, base: Style) -> Vec<Line<'static>> {
    let mut renderer = MarkdownRenderer::new(base);
    for event in Parser::new_ext(content, Options::empty()) {
        renderer.handle(event);
    }
    renderer.finish()
}

struct MarkdownRenderer {
    base: Style,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    /// One entry per open list: the next number for ordered lists.
    lists: Vec<Option<u64>>,
}

impl MarkdownRenderer {
    fn new(base: Style) -> Self {
        Self {
            base,
            lines: Vec::new(),
            current: Vec::new(),
            bold: 0,
            italic: 0,
            lists: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        let mut style = self.base;
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                self.bold += 1;
                if level == HeadingLevel::H1 {
                    self.italic += 1;
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                self.bold = self.bold.saturating_sub(1);
                if level == HeadingLevel::H1 {
                    self.italic = self.italic.saturating_sub(1);
                }
                self.flush_line();
                self.blank_line();
            }
            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}. ");
                        *next += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::styled(
                    format!("{}{}", LIST_INDENT.repeat(depth), marker),
                    self.base,
                ));
            }
            Event::End(TagEnd::Item) => self.flush_line(),
            Event::Start(Tag::Strong) => self.bold += 1,
            Event::End(TagEnd::Strong) => self.bold = self.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.italic += 1,
            Event::End(TagEnd::Emphasis) => self.italic = self.italic.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => {
                let style = self.style();
                self.current.push(Span::styled(text.into_string(), style));
            }
            Event::SoftBreak => {
                let style = self.style();
                self.current.push(Span::styled(" ".to_string(), style));
            }
            Event::HardBreak => self.flush_line(),
            _ => {}
        }
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| !line.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn bold_text_carries_the_modifier() {
        let lines = render_markdown("Say **hello** there", Style::default());
        assert_eq!(plain(&lines), vec!["Say hello there"]);
        let bold = lines[0]
            .spans
            .iter()
            .find(|span| span.content == "hello")
            .expect("bold span");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn nested_lists_are_numbered_and_indented() {
        let content = "Intro:\n\n1. **First**\n   - Example: one\n2. **Second**\n   - Example: two\n\nBye";
        let lines = render_markdown(content, Style::default());
        assert_eq!(
            plain(&lines),
            vec![
                "Intro:",
                "",
                "1. First",
                "   • Example: one",
                "2. Second",
                "   • Example: two",
                "",
                "Bye",
            ]
        );
    }

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        let lines = render_markdown("One\n\nTwo\nstill two", Style::default());
        assert_eq!(plain(&lines), vec!["One", "", "Two still two"]);
    }
}
