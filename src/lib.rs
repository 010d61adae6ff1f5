//! Recipe Bot is a terminal chat that answers recipe questions.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`commands`] turns a free-text utterance into an intent and a recipe
//!   subject.
//! - [`api`] holds the recipe service payloads and the HTTP backend.
//! - [`core`] resolves subjects to recipes, projects results into chat
//!   messages, persists the conversation and tracks connectivity.
//! - [`ui`] renders the chat screen and runs the interactive event loop.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
