//! The interactive chat screen.
//!
//! A single loop owns the [`Conversation`]: it reads terminal events from a
//! reader task, starts lookups on the [`LookupService`], applies their
//! results, and follows the connectivity monitor.

pub mod lifecycle;

use std::error::Error;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::client::HttpRecipeBackend;
use crate::core::config::data::Config;
use crate::core::connectivity::{spawn_monitor, Connectivity, PROBE_INTERVAL};
use crate::core::conversation::Conversation;
use crate::core::dispatch::{LookupEvent, LookupService};
use crate::core::lookup::RecipeLookup;
use crate::core::pipeline::CommandPipeline;
use crate::core::store::JsonFileStore;
use crate::ui::renderer::{max_scroll_from_bottom, ui, ChatView};
use crate::ui::theme::Theme;
use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

const PAGE_SCROLL: u16 = 10;
const ANIMATION_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit(String),
    Quit,
}

/// Input and view state of the chat screen.
#[derive(Debug)]
pub struct ChatState {
    pub input: String,
    pub scroll_from_bottom: u16,
    pub connectivity: Connectivity,
    pub tick: usize,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            input: String::new(),
            scroll_from_bottom: 0,
            connectivity: Connectivity::Online,
            tick: 0,
        }
    }
}

impl ChatState {
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => return KeyOutcome::Quit,
            KeyCode::Enter => {
                let text = self.input.trim().to_string();
                if text.is_empty() {
                    return KeyOutcome::Continue;
                }
                self.input.clear();
                self.scroll_from_bottom = 0;
                return KeyOutcome::Submit(text);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1),
            KeyCode::Down => self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1),
            KeyCode::PageUp => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(PAGE_SCROLL)
            }
            KeyCode::PageDown => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(PAGE_SCROLL)
            }
            KeyCode::End => self.scroll_from_bottom = 0,
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Pasted text joins the input on one line.
    pub fn handle_paste(&mut self, text: &str) {
        let flattened = text.replace(['\r', '\n'], " ");
        self.input.push_str(&flattened);
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(config: Config) -> Result<(), Box<dyn Error>> {
    let api_key = config.effective_api_key().ok_or(
        "No API key configured. Run 'recipe-bot set api-key <key>' or set SPOONACULAR_API_KEY.",
    )?;
    let base_url = config.effective_base_url();
    let backend = HttpRecipeBackend::new(base_url.clone(), api_key, config.timeout())?;
    let lookup = RecipeLookup::new(backend).with_search_results(config.effective_search_results());
    let (service, lookup_rx) = LookupService::new(CommandPipeline::new(lookup));

    let history_file = config.effective_history_file();
    info!(history = %history_file.display(), "Loading conversation");
    let conversation = Conversation::load(Box::new(JsonFileStore::new(history_file)));

    let shutdown = CancellationToken::new();
    let connectivity_rx = spawn_monitor(&base_url, PROBE_INTERVAL, shutdown.clone());

    let mut terminal = setup_terminal()?;
    let result = event_loop(
        &mut terminal,
        conversation,
        service,
        lookup_rx,
        connectivity_rx,
    )
    .await;
    shutdown.cancel();
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut ChatTerminal,
    mut conversation: Conversation,
    service: LookupService<RecipeLookup<HttpRecipeBackend>>,
    mut lookup_rx: mpsc::UnboundedReceiver<(LookupEvent, u64)>,
    mut connectivity_rx: tokio::sync::watch::Receiver<Connectivity>,
) -> Result<(), Box<dyn Error>> {
    let theme = Theme::default();
    let mut state = ChatState {
        connectivity: *connectivity_rx.borrow(),
        ..ChatState::default()
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let reader = spawn_event_reader(event_tx);
    let mut animation = tokio::time::interval(ANIMATION_INTERVAL);
    let mut monitor_live = true;

    let outcome = loop {
        let size = terminal.size()?;
        let max_scroll = max_scroll_from_bottom(&conversation, &theme, state.tick, size.width, size.height);
        state.scroll_from_bottom = state.scroll_from_bottom.min(max_scroll);

        terminal.draw(|f| {
            let view = ChatView {
                conversation: &conversation,
                input: &state.input,
                scroll_from_bottom: state.scroll_from_bottom,
                connectivity: state.connectivity,
                tick: state.tick,
                theme: &theme,
            };
            ui(f, &view);
        })?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                let Some(ev) = maybe_event else {
                    break Ok(());
                };
                match ev {
                    Event::Key(key) => match state.handle_key(key) {
                        KeyOutcome::Quit => break Ok(()),
                        KeyOutcome::Submit(text) => {
                            let (token, generation) = conversation.begin_lookup(&text);
                            debug!(generation, "Submitted command");
                            service.spawn_lookup(text, token, generation);
                        }
                        KeyOutcome::Continue => {}
                    },
                    Event::Paste(text) => state.handle_paste(&text),
                    _ => {}
                }
            }
            Some((event, generation)) = lookup_rx.recv() => {
                let LookupEvent::Completed(messages) = event;
                conversation.apply_result(generation, messages);
            }
            changed = connectivity_rx.changed(), if monitor_live => {
                match changed {
                    Ok(()) => state.connectivity = *connectivity_rx.borrow_and_update(),
                    Err(_) => monitor_live = false,
                }
            }
            _ = animation.tick() => {
                if conversation.is_pending() {
                    state.tick = state.tick.wrapping_add(1);
                }
            }
        }
    };

    conversation.cancel_pending();
    reader.abort();
    outcome
}
