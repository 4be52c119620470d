use clap::ValueEnum;
use std::io::{self, Write};

mod auth;
mod category;
mod config_cmd;
mod init;
mod itinerary;
mod transfer;

pub use auth::AuthCommand;
pub use category::CategoryCommand;
pub use config_cmd::ConfigCommand;
pub use init::InitCommand;
pub use itinerary::ItineraryCommand;
pub use transfer::{ExportCommand, ImportCommand};

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question on stdin. Anything but "y" counts as no.
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Shortens `text` to `width` characters for table columns.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
