#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Card rendering for zyntiq
//!
//! Presentation states are first projected into [`Card`] content blocks,
//! which front-ends then draw. [`to_html`] produces the markup a browser
//! page would insert into its result section.

mod card;
mod html;

pub use card::{cards_for, verified_card, Card, CardAction, Field};
pub use html::{escape_html, to_html, HtmlView};
