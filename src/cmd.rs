//! Command implementations for the CLI interface.

use std::io::{self, Write};
use std::time::Duration;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::error::{Error, Result};
use crate::source::TaskSource;
use crate::task::TaskRecord;
use crate::tui::app::App;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the task page (default).
    Ui,

    /// Print every task card as plain text.
    List,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the interactive task page.
pub fn cmd_ui(source: &dyn TaskSource, long_press: Duration) -> Result<()> {
    let app = App::from_source(source, long_press)?;
    run_tui(app)?;
    info!("task page closed");
    Ok(())
}

/// Print the cards of `source` to stdout, separated by blank lines.
pub fn cmd_list(source: &dyn TaskSource) -> Result<()> {
    let tasks = source.fetch_tasks()?;
    let mut out = io::stdout().lock();
    print_cards(&mut out, &tasks)
}

/// Write cards, treating a closed reader (`task-page list | head`) as the end of output.
fn print_cards(out: &mut impl Write, tasks: &[TaskRecord]) -> Result<()> {
    match write_cards(out, tasks).and_then(|()| out.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::Output(e)),
    }
}

fn write_cards(out: &mut impl Write, tasks: &[TaskRecord]) -> io::Result<()> {
    for (i, task) in tasks.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        for line in task.card_lines() {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
