//! Event handling and user feedback

use console::Style;
use zyntiq_events::{AppEvent, EventMessage, FetchEvent, PortalEvent};

use crate::logging::log_event_with_tracing;

/// Drains the event channel: everything goes to tracing, a few events
/// are also shown on stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    quiet: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            quiet: false,
        }
    }

    /// Suppress all stderr output (JSON mode)
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        if let Some((line, warning)) = self.user_line(&message.event) {
            self.show(&line, warning);
        }
    }

    /// Text to show the user for an event, and whether it is a warning
    fn user_line(&self, event: &AppEvent) -> Option<(String, bool)> {
        if self.quiet {
            return None;
        }
        match event {
            AppEvent::Portal(PortalEvent::PreloadFailed { failure }) => Some((
                format!(
                    "Could not preload member data ({}); the first search will try again",
                    failure.message
                ),
                true,
            )),
            AppEvent::Portal(PortalEvent::DatasetCached { records }) if self.debug_enabled => {
                Some((format!("Loaded {records} member records"), false))
            }
            AppEvent::Fetch(FetchEvent::Completed {
                records,
                elapsed_ms,
                ..
            }) if self.debug_enabled => Some((
                format!("Fetched {records} records in {elapsed_ms} ms"),
                false,
            )),
            _ => None,
        }
    }

    fn show(&self, message: &str, warning: bool) {
        let style = match (self.colors_enabled, warning) {
            (false, _) => Style::new(),
            (true, true) => Style::new().yellow(),
            (true, false) => Style::new().dim(),
        };
        eprintln!("{}", style.apply_to(message));
    }
}
