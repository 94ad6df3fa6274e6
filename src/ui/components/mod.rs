//! ShadCN-style building blocks for the widget.
//!
//! - [`button_classes`]: Button styling with variants and sizes
//! - [`Badge`]: Status badge
//! - [`icons`]: SVG icon components

mod badge;
mod button;
mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::{ButtonSize, ButtonVariant, button_classes};
pub use icons::*;
