//! The page with the form for creating an account.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, PRIMARY_BUTTON_CLASS, TEXT_FIELD_CLASS, base},
    navigation::NavBar,
};

/// Render the page with the new-account form.
pub async fn get_create_account_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_ACCOUNT_VIEW).into_html();
    let form = new_account_form_view("", "COP", "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_CLASS) { (form) }
    };

    base("Add Account", &[], &content).into_response()
}

pub(super) fn new_account_form_view(name: &str, currency: &str, error_message: &str) -> Markup {
    html! {
        form hx-post=(endpoints::POST_ACCOUNT) hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6 w-full" {
            div {
                label for="name" class=(FIELD_LABEL_CLASS) { "Account Name" }
                input id="name" type="text" name="name" placeholder="Account Name"
                    value=(name) required autofocus class=(TEXT_FIELD_CLASS);
            }

            div {
                label for="currency" class=(FIELD_LABEL_CLASS) { "Currency" }
                input id="currency" type="text" name="currency" placeholder="COP"
                    value=(currency) maxlength="3" required class=(TEXT_FIELD_CLASS);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(PRIMARY_BUTTON_CLASS) { "Add Account" }
        }
    }
}
