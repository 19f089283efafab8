//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use std::io;
use tracing::{debug, warn};
use zyntiq_portal::{PresentationState, View};
use zyntiq_render::{cards_for, to_html, Card};
use zyntiq_types::{ColorChoice, OutputFormat};

/// Resolve a color choice against the terminal
pub fn colors_enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => Term::stdout().features().colors_supported(),
    }
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    colors_enabled: bool,
    /// Show how to trigger card actions
    interactive: bool,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, colors_enabled: bool) -> Self {
        Self {
            format,
            colors_enabled,
            interactive: false,
        }
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a settled presentation state
    pub fn render_state(&self, state: &PresentationState) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(state).map_err(io::Error::other)?;
                println!("{json}");
            }
            OutputFormat::Html => print!("{}", to_html(&cards_for(state))),
            OutputFormat::Plain => {
                for card in cards_for(state) {
                    self.render_plain(&card);
                }
            }
            OutputFormat::Tty => {
                for card in cards_for(state) {
                    self.render_card(&card);
                }
            }
        }
        Ok(())
    }

    /// Render the member count
    pub fn render_count(&self, count: usize) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let json = serde_json::json!({ "members": count });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).map_err(io::Error::other)?
            );
        } else {
            println!("{count} registered members");
        }
        Ok(())
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.colors_enabled)
    }

    fn render_card(&self, card: &Card) {
        let (mark, accent) = match card {
            Card::Verified { .. } => ("✓", Style::new().green()),
            Card::NotFound { .. } => ("✗", Style::new().yellow()),
            Card::ConnectionError => ("!", Style::new().red()),
        };

        let mut heading = format!(
            "{} {}",
            self.style(accent.clone().bold()).apply_to(mark),
            self.style(Style::new().bold()).apply_to(card.title())
        );
        if let Some(badge) = card.badge() {
            heading.push_str(&format!("  {}", self.style(accent).apply_to(format!("[{badge}]"))));
        }
        println!("{heading}");
        println!("  {}", self.style(Style::new().dim()).apply_to(card.subtitle()));

        match card {
            Card::Verified { fields, .. } => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic);
                if !self.colors_enabled {
                    table.force_no_tty();
                }
                for field in fields {
                    table.add_row(vec![
                        Cell::new(field.label)
                            .add_attribute(Attribute::Bold)
                            .fg(Color::Cyan),
                        Cell::new(&field.value),
                    ]);
                }
                println!("{table}");
            }
            Card::NotFound { .. } | Card::ConnectionError => {
                if let Some(message) = card.message() {
                    println!("  {message}");
                }
                self.render_action_hint(card);
            }
        }
        println!();
    }

    fn render_plain(&self, card: &Card) {
        println!("{}", card.title());
        match card {
            Card::Verified { fields, .. } => {
                for field in fields {
                    println!("  {}: {}", field.label, field.value);
                }
            }
            Card::NotFound { .. } | Card::ConnectionError => {
                if let Some(message) = card.message() {
                    println!("  {message}");
                }
                self.render_action_hint(card);
            }
        }
    }

    fn render_action_hint(&self, card: &Card) {
        if !self.interactive {
            return;
        }
        if let Some(action) = card.action() {
            println!(
                "  {}",
                self.style(Style::new().dim())
                    .apply_to(format!("{}: type :retry", action.label()))
            );
        }
    }
}

/// Terminal implementation of the controller's view
pub struct TerminalView {
    renderer: OutputRenderer,
    term: Term,
    placeholder: String,
}

impl TerminalView {
    pub fn new(renderer: OutputRenderer) -> Self {
        Self {
            renderer,
            term: Term::stderr(),
            placeholder: String::new(),
        }
    }

    /// Prompt text for the current search mode
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

impl View for TerminalView {
    fn render(&mut self, state: &PresentationState) {
        match state {
            PresentationState::Idle => {}
            PresentationState::Loading { mode, query } => {
                let line = format!("Verifying {} \"{query}\"...", mode.noun());
                eprintln!(
                    "{}",
                    self.renderer.style(Style::new().dim()).apply_to(line)
                );
            }
            _ => {
                if let Err(e) = self.renderer.render_state(state) {
                    warn!(error = %e, "failed to render result");
                }
            }
        }
    }

    // the prompt owns the input line
    fn set_query_text(&mut self, _text: &str) {}

    fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn nudge_invalid_input(&mut self) {
        if let Err(e) = self.term.write_str("\u{7}") {
            debug!(error = %e, "failed to ring terminal bell");
        }
        let line = format!("Nothing to search for. {}", self.placeholder);
        eprintln!(
            "{}",
            self.renderer.style(Style::new().yellow()).apply_to(line)
        );
    }
}
