//! Badge component for status indicators.

use leptos::prelude::*;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Ready/online badge.
    #[default]
    Success,
    /// Busy badge.
    Pending,
}

impl BadgeVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Success => "cw-badge--success",
            Self::Pending => "cw-badge--pending",
        }
    }
}

/// Badge component for displaying status.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Badge variant=BadgeVariant::Pending>"Thinking…"</Badge>
/// }
/// ```
#[component]
pub fn Badge(
    /// Badge variant.
    #[prop(default = BadgeVariant::Success)]
    variant: BadgeVariant,
    /// Badge content.
    children: Children,
) -> impl IntoView {
    let classes = format!("cw-badge {}", variant.classes());

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}
