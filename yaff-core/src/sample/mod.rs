//! Sample Components
//!
//! Two components written in exactly the shape the code generator emits:
//! [`GreetingPanel`] owns a `name` state and embeds a [`ProfileCard`], which
//! receives that state as a prop and composes its own reaction onto it.
//!
//! They double as the fixtures for the end-to-end tests.

mod greeting_panel;
mod profile_card;

pub use greeting_panel::{GreetingPanel, GreetingPanelIds};
pub use profile_card::{ProfileCard, ProfileCardIds};

use std::fmt::Display;

use crate::reactive::ReactiveValue;

/// Current value as text, or empty if absent.
fn text_of<T>(value: &ReactiveValue<T>) -> String
where
    T: Clone + Display + Send + Sync + 'static,
{
    value.get().map(|v| v.to_string()).unwrap_or_default()
}
