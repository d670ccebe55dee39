//! The page and API endpoint for creating a category.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_database,
    category::{CategoryName, create_category, domain::CategoryFormData},
    endpoints,
    html::{FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, PRIMARY_BUTTON_CLASS, TEXT_FIELD_CLASS, base},
    navigation::NavBar,
};

/// The state needed for the [create_category_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct CreateCategoryEndpointState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page with the new-category form.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Create a category from the submitted form.
///
/// Success redirects to the category list. An invalid or duplicate name
/// re-renders the form with an error message.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryEndpointState>,
    Form(new_category): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => return new_category_form_view(&format!("Error: {error}")).into_response(),
    };
    let icon = new_category.icon.trim();
    let icon = (!icon.is_empty()).then_some(icon);

    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    match create_category(name, icon, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::DuplicateCategoryName(_)) => {
            new_category_form_view(&format!("Error: {error}")).into_response()
        }
        Err(error) => {
            tracing::error!("could not create category: {error}");
            error.into_alert_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = new_category_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_CLASS) { (form) }
    };

    base("Create Category", &[], &content)
}

fn new_category_form_view(error_message: &str) -> Markup {
    html! {
        form hx-post=(endpoints::POST_CATEGORY) hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6 w-full" {
            div {
                label for="name" class=(FIELD_LABEL_CLASS) { "Category Name" }
                input id="name" type="text" name="name" placeholder="Category Name"
                    required autofocus class=(TEXT_FIELD_CLASS);
            }

            div {
                label for="icon" class=(FIELD_LABEL_CLASS) { "Icon (optional)" }
                input id="icon" type="text" name="icon" placeholder="🍽️" class=(TEXT_FIELD_CLASS);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(PRIMARY_BUTTON_CLASS) { "Create Category" }
        }
    }
}
