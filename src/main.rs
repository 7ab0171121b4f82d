//! # Task Page
//!
//! A terminal view of case cards. Each card shows the case number, the
//! instruction, who allotted it, and the allotted and end dates.
//!
//! ## Usage
//!
//! ```bash
//! # Open the task page over the built-in sample cases
//! task-page
//!
//! # Open it over a JSON file of tasks
//! task-page --data tasks.json
//!
//! # Print the cards without the TUI
//! task-page list --data tasks.json
//! ```
//!
//! Long-press a card (hold the left mouse button, or press Enter on the
//! selected card) to open the action sheet:
//!
//! - **Remark** writes a remark for the case.
//! - **Show Remark** lists the remarks written this session.
//!
//! The task file is a JSON array (or `{ "tasks": [...] }`) of objects with
//! `case_id`, `instruction`, `assigned_by`, `assigned_date` and `due_date`,
//! dates in `YYYY-MM-DD`. Logs go to `~/.task-page/task-page.log`, filtered
//! by `RUST_LOG`.

use clap::Parser;
use tracing::{error, info};

pub mod cli;
pub mod cmd;
pub mod error;
pub mod logging;
pub mod source;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod gesture;
    pub mod input;
    pub mod navigation;
    pub mod run;
    pub mod sheet;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use source::source_for;

fn main() {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_path());
    info!(version = env!("CARGO_PKG_VERSION"), "task page starting");

    let source = source_for(cli.data.as_deref());
    let result = match &cli.command {
        None | Some(Commands::Ui) => cmd_ui(source.as_ref(), cli.long_press()),
        Some(Commands::List) => cmd_list(source.as_ref()),
        Some(Commands::Completions { shell }) => {
            cmd_completions(*shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
