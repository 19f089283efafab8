//! Interactive verification session

use dialoguer::{theme::ColorfulTheme, Input};
use zyntiq_net::DatasetSource;
use zyntiq_portal::Portal;
use zyntiq_types::SearchMode;

use crate::display::TerminalView;
use crate::error::CliError;

/// One line of session input
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    Search(&'a str),
    Mode(SearchMode),
    Retry,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> SessionCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Search(line);
        };
        match command {
            "uid" | "id" => Self::Mode(SearchMode::Uid),
            "name" => Self::Mode(SearchMode::Name),
            "retry" | "r" => Self::Retry,
            "clear" | "c" => Self::Clear,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Unknown(other),
        }
    }
}

fn print_help() {
    println!("Type a UID or name and press Enter to verify it.");
    println!("  :uid    search by UID");
    println!("  :name   search by name");
    println!("  :retry  retry the last card action");
    println!("  :clear  clear the result");
    println!("  :quit   leave the session");
}

async fn read_line(prompt: String) -> Result<String, CliError> {
    tokio::task::spawn_blocking(move || {
        let theme = ColorfulTheme::default();
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    })
    .await
    .map_err(|e| CliError::Input(e.to_string()))?
    .map_err(|e| CliError::Input(e.to_string()))
}

/// Run the prompt loop until `:quit`
pub async fn run_session<S: DatasetSource>(
    portal: &mut Portal<S, TerminalView>,
) -> Result<(), CliError> {
    portal.initialize().await;
    println!("Zyntiq member verification. Type :help for commands.");
    if let Some(count) = portal.member_count() {
        println!("{count} registered members");
    }

    loop {
        let prompt = portal.view().placeholder().to_string();
        let line = read_line(prompt).await?;

        match SessionCommand::parse(&line) {
            SessionCommand::Quit => break,
            SessionCommand::Mode(mode) => portal.switch_mode(mode),
            SessionCommand::Retry => {
                portal.retry().await;
            }
            SessionCommand::Clear => portal.clear(),
            SessionCommand::Help => print_help(),
            SessionCommand::Unknown(command) => {
                eprintln!("Unknown command :{command}; type :help");
            }
            SessionCommand::Search(text) => {
                portal.set_query_text(text);
                portal.submit().await;
            }
        }
    }
    Ok(())
}
