//! Alert banners for reporting the outcome of HTMX form submissions.
//!
//! Endpoints return these fragments and the `response-targets` extension swaps
//! them into the `#alert-container` element rendered by [base](crate::html::base).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

const SUCCESS_ALERT_CLASS: &str = "flex items-start gap-3 w-full p-4 text-sm \
    text-green-800 rounded-lg border border-green-300 bg-green-50 shadow \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_ALERT_CLASS: &str = "flex items-start gap-3 w-full p-4 text-sm \
    text-red-800 rounded-lg border border-red-300 bg-red-50 shadow \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// A dismissible alert banner.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Reports a successful operation.
    Success {
        /// The alert headline.
        message: String,
        /// Explanatory text shown below the headline. May be empty.
        details: String,
    },
    /// Reports a failed operation.
    Error {
        /// The alert headline.
        message: String,
        /// Explanatory text shown below the headline.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_markup(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_ALERT_CLASS, message, details),
            Alert::Error { message, details } => (ERROR_ALERT_CLASS, message, details),
        };

        html! {
            div role="alert" class=(style)
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                    class="font-bold cursor-pointer"
                {
                    (PreEscaped("&times;"))
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        // Must be 200 OK so that HTMX applies the swap on the initiating element.
        (StatusCode::OK, self.into_markup()).into_response()
    }
}

/// Render an error alert fragment with the given HTTP status code.
pub(crate) fn error_alert_response(
    status_code: StatusCode,
    message: &str,
    details: &str,
) -> Response {
    (
        status_code,
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
        .into_markup(),
    )
        .into_response()
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn success_alert_renders_message_and_details() {
        let markup = Alert::Success {
            message: "Saved".to_owned(),
            details: "The account was updated.".to_owned(),
        }
        .into_markup();

        let html = Html::parse_fragment(&markup.into_string());
        let paragraphs = must_get_paragraphs(&html);

        assert_eq!(paragraphs, vec!["Saved", "The account was updated."]);
    }

    #[test]
    fn empty_details_omits_details_paragraph() {
        let markup = Alert::Success {
            message: "Deleted".to_owned(),
            details: String::new(),
        }
        .into_markup();

        let html = Html::parse_fragment(&markup.into_string());
        let paragraphs = must_get_paragraphs(&html);

        assert_eq!(paragraphs, vec!["Deleted"]);
    }

    #[test]
    fn error_alert_uses_error_styling() {
        let markup = Alert::Error {
            message: "Could not save".to_owned(),
            details: "Try again.".to_owned(),
        }
        .into_markup();

        let html = Html::parse_fragment(&markup.into_string());
        let alert_selector = Selector::parse("div[role=alert]").unwrap();
        let alert = html
            .select(&alert_selector)
            .next()
            .expect("no alert element found");

        let class = alert.value().attr("class").expect("alert has no class");
        assert!(
            class.contains("text-red-800"),
            "want error styling, got {class}"
        );
    }

    fn must_get_paragraphs(html: &Html) -> Vec<String> {
        let paragraph_selector = Selector::parse("p").unwrap();
        html.select(&paragraph_selector)
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect()
    }
}
