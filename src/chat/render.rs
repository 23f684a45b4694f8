//! Output rendering for the chat application.
//!
//! The renderer is a trait so the REPL can be driven against stdout or, in
//! tests, an in-memory buffer.

use std::io::{self, Stdout, Write};

use crate::crisis::CrisisContact;
use crate::types::{ChatMessage, Mood, ResourceGroup, Sender};

/// ANSI escape code for dim text (used for the typing indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for headings).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the bot's name).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for the crisis alert and errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print a conversation message.
    fn print_message(&mut self, message: &ChatMessage);

    /// Print the indicator shown while a reply is pending.
    fn print_typing(&mut self);

    /// Print the crisis alert with the ways to get help.
    fn print_crisis_alert(&mut self, contacts: &[CrisisContact]);

    /// Print the support resources.
    fn print_resources(&mut self, groups: &[ResourceGroup]);

    /// Print the mood picker.
    fn print_moods(&mut self, selected: Option<Mood>);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Consumes the renderer, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&mut self, line: &str) {
        // Output errors are dropped; the session state is unaffected.
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_message(&mut self, message: &ChatMessage) {
        let label = match message.sender() {
            Sender::User => "You".to_string(),
            Sender::Bot => self.styled(ANSI_CYAN, "Talk2Me"),
        };
        self.emit(&format!("{label}: {}", message.text()));
    }

    fn print_typing(&mut self) {
        let line = self.styled(ANSI_DIM, "Talk2Me is typing...");
        self.emit(&line);
    }

    fn print_crisis_alert(&mut self, contacts: &[CrisisContact]) {
        let heading = self.styled(ANSI_RED, "Need immediate help?");
        self.emit(&heading);
        self.emit("If you're in crisis, please reach out for support right away:");
        for contact in contacts {
            self.emit(&format!("  - {}: {}", contact.name, contact.reach));
        }
        self.emit("You matter. Help is available 24/7. (/dismiss to close)");
    }

    fn print_resources(&mut self, groups: &[ResourceGroup]) {
        let heading = self.styled(ANSI_BOLD, "Helpful Resources");
        self.emit(&heading);
        for group in groups {
            self.emit(&format!("  {}", group.category));
            for link in &group.links {
                let mut line = format!("    - {} <{}>", link.name, link.url);
                if let Some(phone) = &link.phone {
                    line.push_str(&format!(" call {phone}"));
                }
                if let Some(text) = &link.text {
                    line.push_str(&format!(" text {text}"));
                }
                self.emit(&line);
            }
        }
    }

    fn print_moods(&mut self, selected: Option<Mood>) {
        self.emit("How are you feeling today?");
        for mood in Mood::ALL {
            let marker = if selected == Some(mood) { "*" } else { " " };
            self.emit(&format!(" {marker} {mood}"));
        }
    }

    fn print_error(&mut self, error: &str) {
        let line = self.styled(ANSI_RED, &format!("Error: {error}"));
        self.emit(&line);
    }

    fn print_info(&mut self, info: &str) {
        let line = self.styled(ANSI_DIM, info);
        self.emit(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crisis::CRISIS_CONTACTS;
    use crate::resources;

    fn render(f: impl FnOnce(&mut PlainTextRenderer<Vec<u8>>)) -> String {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        f(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn messages_are_labelled() {
        let out = render(|r| {
            r.print_message(&ChatMessage::new(1, "hi", Sender::Bot));
            r.print_message(&ChatMessage::new(2, "hello", Sender::User));
        });
        assert_eq!(out, "Talk2Me: hi\nYou: hello\n");
    }

    #[test]
    fn crisis_alert_lists_contacts() {
        let out = render(|r| r.print_crisis_alert(CRISIS_CONTACTS));
        assert!(out.starts_with("Need immediate help?\n"));
        assert!(out.contains("call 988"));
        assert!(out.contains("text HOME to 741741"));
    }

    #[test]
    fn resources_render_in_group_order() {
        let out = render(|r| r.print_resources(&resources::default_groups()));
        let mental = out.find("Mental Health").unwrap();
        let sexual = out.find("Sexual Health").unwrap();
        assert!(mental < sexual);
        assert!(out.contains("    - Calm App <https://www.calm.com>\n"));
    }

    #[test]
    fn moods_mark_selection() {
        let out = render(|r| r.print_moods(Some(Mood::Sad)));
        assert!(out.contains(" * \u{1F614} Sad\n"));
        assert!(out.contains("   \u{1F60A} Happy\n"));
    }

    #[test]
    fn color_wraps_bot_label() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), true);
        renderer.print_message(&ChatMessage::new(1, "hi", Sender::Bot));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, format!("{ANSI_CYAN}Talk2Me{ANSI_RESET}: hi\n"));
    }
}
