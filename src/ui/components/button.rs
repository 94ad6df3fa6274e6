//! Button styling shared by the launcher, modal and composer.
//!
//! Widget buttons carry HTMX and Alpine attributes that vary per use, so they
//! are plain `<button>` elements styled through [`button_classes`].

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Subtle ghost button.
    Ghost,
    /// Round floating action button.
    Floating,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "cw-btn--primary",
            Self::Ghost => "cw-btn--ghost",
            Self::Floating => "cw-btn--floating",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Medium button (default).
    #[default]
    Md,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Md => "cw-btn--md",
            Self::Icon => "cw-btn--icon",
        }
    }
}

/// Full class list for a widget button.
#[must_use]
pub fn button_classes(variant: ButtonVariant, size: ButtonSize) -> String {
    format!("cw-btn {} {}", variant.classes(), size.classes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_classes() {
        assert_eq!(
            button_classes(ButtonVariant::Floating, ButtonSize::Icon),
            "cw-btn cw-btn--floating cw-btn--icon"
        );
    }
}
