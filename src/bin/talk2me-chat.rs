//! Interactive terminal front-end for the Talk2Me health buddy.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a backend on the default address
//! talk2me-chat
//!
//! # Point at another backend and skip the typing delay
//! talk2me-chat --base-url https://talk2me.example.com --reply-delay-ms 0
//!
//! # Disable colors (useful for piping output)
//! talk2me-chat --no-color
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default
//! `talk2me=info`).

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use talk2me::chat::{
    ChatArgs, ChatCommand, ChatConfig, PlainTextRenderer, Renderer, help_text, parse_command,
};
use talk2me::crisis::CRISIS_CONTACTS;
use talk2me::{HttpChatClient, SessionController};

/// Main entry point for the talk2me-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "talk2me=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("talk2me-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let client = HttpChatClient::new(config.client.clone())?;
    tracing::info!(endpoint = %client.endpoint(), "talk2me-chat starting");
    let session = SessionController::new(Arc::new(client), config.session.clone());
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Talk2Me - type /help for commands, /quit to exit\n");
    for message in session.messages() {
        renderer.print_message(&message);
    }

    let mut alert_shown = false;
    loop {
        let line = match rl.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                renderer.print_error(&format!("Input error: {err}"));
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        if let Some(cmd) = parse_command(line) {
            match cmd {
                ChatCommand::Quit => {
                    println!("Take care!");
                    break;
                }
                ChatCommand::Help => {
                    for line in help_text().lines() {
                        println!("    {}", line);
                    }
                }
                ChatCommand::Dismiss => {
                    session.dismiss_crisis_alert();
                    alert_shown = false;
                    renderer.print_info("Crisis alert closed.");
                }
                ChatCommand::Resources => {
                    renderer.print_resources(&session.resource_groups());
                }
                ChatCommand::History => {
                    for message in session.messages() {
                        renderer.print_message(&message);
                    }
                }
                ChatCommand::Mood(mood) => {
                    session.set_mood(mood);
                    match mood {
                        Some(mood) => renderer.print_info(&format!("Mood noted: {mood}")),
                        None => renderer.print_info("Mood cleared."),
                    }
                }
                ChatCommand::ListMoods => {
                    renderer.print_moods(session.mood());
                }
                ChatCommand::Invalid(msg) => {
                    renderer.print_error(&msg);
                }
            }
            continue;
        }

        let resources_before = session.resource_groups();
        let pending = match session.submit(line) {
            Ok(Some(pending)) => pending,
            Ok(None) => continue,
            Err(err) => {
                renderer.print_error(&err.to_string());
                continue;
            }
        };
        show_alert_if_raised(&session, &mut renderer, &mut alert_shown);
        renderer.print_typing();

        let outcome = pending.await;
        if let Some(message) = outcome.message() {
            renderer.print_message(message);
        }
        show_alert_if_raised(&session, &mut renderer, &mut alert_shown);
        let resources_after = session.resource_groups();
        if resources_after != resources_before {
            renderer.print_resources(&resources_after);
        }
    }

    session.dispose();
    Ok(())
}

fn show_alert_if_raised(
    session: &SessionController,
    renderer: &mut dyn Renderer,
    alert_shown: &mut bool,
) {
    if session.crisis_alert_visible() && !*alert_shown {
        renderer.print_crisis_alert(CRISIS_CONTACTS);
        *alert_shown = true;
    }
}
