//! Terminal UI layer for the chat screen.
//!
//! - [`chat_loop`]: the interaction loop that turns key presses into
//!   lookups and applies their results to the conversation.
//! - [`renderer`] and [`bubbles`]: frame layout and per-message lines.
//! - [`markdown`]: inline Markdown for bot text bubbles.
//! - [`theme`]: styles.

pub mod bubbles;
pub mod chat_loop;
pub mod markdown;
pub mod renderer;
pub mod theme;
