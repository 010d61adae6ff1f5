use ratatui::style::{Color, Modifier, Style};

/// The single built-in palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_prefix_style: Style,
    pub bot_text_style: Style,
    pub error_text_style: Style,

    // Recipe cards
    pub card_title_style: Style,
    pub card_detail_style: Style,
    pub card_accent_style: Style,

    // Chrome
    pub title_style: Style,
    pub offline_banner_style: Style,
    pub loader_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_prefix_style: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),
            error_text_style: Style::default().fg(Color::LightRed),

            card_title_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            card_detail_style: Style::default().fg(Color::Gray),
            card_accent_style: Style::default().fg(Color::LightMagenta),

            title_style: Style::default().fg(Color::Gray),
            offline_banner_style: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            loader_style: Style::default().fg(Color::LightGreen),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
        }
    }
}
