//! Slash command parsing for the chat application.
//!
//! Input that starts with `/` controls the session locally and is never sent
//! to the backend.

use crate::types::Mood;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Hide the crisis alert.
    Dismiss,

    /// Show the support resources currently on display.
    Resources,

    /// Reprint the whole conversation.
    History,

    /// Record a mood check-in.
    /// `None` clears the current mood.
    Mood(Option<Mood>),

    /// List the available moods.
    ListMoods,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be submitted as a regular message.
///
/// # Examples
///
/// ```
/// # use talk2me::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/mood anxious").is_some());
/// assert!(parse_command("I can't sleep").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "dismiss" | "close" => ChatCommand::Dismiss,
        "resources" | "links" => ChatCommand::Resources,
        "history" => ChatCommand::History,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "mood" => parse_mood_command(argument),
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_mood_command(argument: Option<&str>) -> ChatCommand {
    match argument {
        None => ChatCommand::ListMoods,
        Some(arg) if arg.eq_ignore_ascii_case("clear") => ChatCommand::Mood(None),
        Some(arg) => match arg.parse::<Mood>() {
            Ok(mood) => ChatCommand::Mood(Some(mood)),
            Err(err) => ChatCommand::Invalid(format!("/mood {err}")),
        },
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /dismiss               Close the crisis alert
  /resources             Show helpful resources
  /history               Reprint the conversation
  /mood [name]           Check in with a mood (no argument lists them, 'clear' resets)
  /help                  Show this help message
  /quit                  Exit the chat"#
}
