//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod history;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::history::{run_clear, run_history};
use crate::cli::say::run_say;
use crate::core::config::data::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging;

#[derive(Parser)]
#[command(name = "recipe-bot")]
#[command(version)]
#[command(about = "A terminal chat bot that answers recipe questions")]
#[command(
    long_about = "Recipe Bot is a full-screen terminal chat that looks up recipes, ingredients \
and cooking instructions through the Spoonacular API.\n\n\
Authentication:\n\
  Run 'recipe-bot set api-key <key>' or export SPOONACULAR_API_KEY.\n\n\
Controls:\n\
  Type              Enter a command in the input field\n\
  Enter             Send the command\n\
  Up/Down           Scroll through the conversation\n\
  PageUp/PageDown   Scroll a page at a time\n\
  Esc or Ctrl+C     Quit the application\n\n\
Commands:\n\
  help                          Show the available commands\n\
  search recipes on <dish>      List matching recipes\n\
  list <dish> recipes           List matching recipes\n\
  <dish> recipe                 Summary of a recipe\n\
  ingredients for <dish>        Ingredient list\n\
  how to make <dish>            Step-by-step instructions"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Run a single command and print the reply
    Say {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Print the stored conversation
    History,
    /// Delete the stored conversation
    Clear,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log.as_deref())?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            match settings::set_in(&Config::get_config_path(), &key, value.as_deref()) {
                Ok(Some(message)) => println!("{message}"),
                Ok(None) => {}
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            match settings::unset_in(&Config::get_config_path(), &key) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
            Ok(())
        }
        Commands::Say { words } => run_say(words, &Config::load()?).await,
        Commands::History => run_history(&Config::load()?),
        Commands::Clear => run_clear(&Config::load()?),
        Commands::Chat => run_chat(Config::load()?).await,
    }
}
