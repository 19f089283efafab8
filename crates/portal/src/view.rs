//! Output surface the controller drives

use crate::PresentationState;

/// Everything the controller needs from a front-end.
///
/// The controller never reaches for a global document; a view is handed to
/// it at construction and only touched through these calls.
pub trait View {
    /// Show a presentation state, replacing whatever was shown before
    fn render(&mut self, state: &PresentationState);

    /// Overwrite the query input field
    fn set_query_text(&mut self, text: &str);

    /// Change the input hint for the active search mode
    fn set_placeholder(&mut self, placeholder: &str);

    /// Non-blocking cue that the submitted input was blank
    fn nudge_invalid_input(&mut self);

    fn focus_input(&mut self) {}
}

impl<V: View + ?Sized> View for &mut V {
    fn render(&mut self, state: &PresentationState) {
        (**self).render(state);
    }

    fn set_query_text(&mut self, text: &str) {
        (**self).set_query_text(text);
    }

    fn set_placeholder(&mut self, placeholder: &str) {
        (**self).set_placeholder(placeholder);
    }

    fn nudge_invalid_input(&mut self) {
        (**self).nudge_invalid_input();
    }

    fn focus_input(&mut self) {
        (**self).focus_input();
    }
}
