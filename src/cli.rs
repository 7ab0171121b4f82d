use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cmd::Commands;

/// Browse case cards in the terminal.
/// Tasks come from the built-in sample or a JSON file passed via --data.
#[derive(Parser)]
#[command(name = "task-page", version, about = "Task cards with remark actions")]
pub struct Cli {
    /// Path to a JSON task file.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// How long a mouse press must be held to open the action sheet.
    #[arg(long, global = true, default_value_t = 500)]
    pub long_press_ms: u64,

    /// Where log output is written. Defaults to ~/.task-page/task-page.log.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".task-page").join("task-page.log")
        })
    }
}
