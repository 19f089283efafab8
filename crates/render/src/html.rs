//! HTML fragment output

use std::fmt::Write;

use crate::card::{cards_for, Card, CardAction};
use zyntiq_portal::{PresentationState, View};

/// Escape text for insertion into element content or attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn variant(card: &Card) -> &'static str {
    match card {
        Card::Verified { .. } => "verified",
        Card::NotFound { .. } | Card::ConnectionError => "not-found",
    }
}

fn action_attr(action: CardAction) -> &'static str {
    match action {
        CardAction::TryAgain => "try-again",
        CardAction::Retry => "retry",
    }
}

fn write_card(out: &mut String, card: &Card) -> std::fmt::Result {
    let class = variant(card);
    writeln!(out, r#"<div class="result-card {class}">"#)?;
    writeln!(out, r#"  <div class="result-header">"#)?;
    writeln!(
        out,
        r#"    <h3 class="result-title">{}</h3>"#,
        escape_html(card.title())
    )?;
    writeln!(
        out,
        r#"    <p class="result-subtitle">{}</p>"#,
        escape_html(card.subtitle())
    )?;
    if let Some(badge) = card.badge() {
        writeln!(out, r#"    <span class="result-badge {class}">{badge}</span>"#)?;
    }
    writeln!(out, "  </div>")?;

    match card {
        Card::Verified { fields, .. } => {
            writeln!(out, r#"  <div class="result-details">"#)?;
            for field in fields {
                writeln!(
                    out,
                    r#"    <div class="detail-item"><span class="detail-label">{}</span><span class="detail-value">{}</span></div>"#,
                    field.label,
                    escape_html(&field.value)
                )?;
            }
            writeln!(out, "  </div>")?;
        }
        Card::NotFound { query, mode } => {
            writeln!(out, r#"  <div class="not-found-message">"#)?;
            writeln!(
                out,
                r#"    <p>No record was found for "<strong>{}</strong>". Please check your {} and try again.</p>"#,
                escape_html(query),
                mode.noun()
            )?;
        }
        Card::ConnectionError => {
            writeln!(out, r#"  <div class="not-found-message">"#)?;
            writeln!(out, "    <p>{}</p>", escape_html(&card.message().unwrap_or_default()))?;
        }
    }

    if let Some(action) = card.action() {
        writeln!(
            out,
            r#"    <button class="retry-btn" data-action="{}">{}</button>"#,
            action_attr(action),
            action.label()
        )?;
        writeln!(out, "  </div>")?;
    }

    writeln!(out, "</div>")
}

/// Render cards as one HTML fragment
#[must_use]
pub fn to_html(cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        // writing into a String cannot fail
        let _ = write_card(&mut out, card);
    }
    out
}

/// A view that keeps the markup of the result section and the input state
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    fragment: String,
    loading: bool,
    query_text: String,
    placeholder: String,
    nudges: usize,
}

impl HtmlView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current result section markup; empty while hidden
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// How many times blank input was rejected
    #[must_use]
    pub fn nudges(&self) -> usize {
        self.nudges
    }
}

impl View for HtmlView {
    fn render(&mut self, state: &PresentationState) {
        self.loading = matches!(state, PresentationState::Loading { .. });
        self.fragment = to_html(&cards_for(state));
    }

    fn set_query_text(&mut self, text: &str) {
        self.query_text = text.to_string();
    }

    fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn nudge_invalid_input(&mut self) {
        self.nudges += 1;
    }
}
