//! Alert messages shown to the user when a form submission fails.
//!
//! Alerts are returned as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use maud::{Markup, html};

/// An error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class="flex items-start gap-3 p-4 mb-4 text-sm rounded-lg border shadow-lg
                    text-red-800 bg-red-50 border-red-300
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex-1"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold"
                    onclick="this.closest('#alert-container').classList.add('hidden')"
                {
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let html = Alert::error("Duplicate transaction", "It was not added again.")
            .into_html()
            .into_string();

        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("Duplicate transaction"));
        assert!(html.contains("It was not added again."));
    }

    #[test]
    fn omits_empty_details() {
        let html = Alert::error("Something went wrong", "")
            .into_html()
            .into_string();

        assert!(!html.contains("<p"));
    }
}
