//! The page and API endpoint for editing a category.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_database,
    category::{CategoryId, CategoryName, domain::CategoryFormData, get_category, update_category},
    endpoints::{self, format_endpoint},
    html::{FIELD_LABEL_CLASS, FORM_CONTAINER_CLASS, PRIMARY_BUTTON_CLASS, TEXT_FIELD_CLASS, base},
    navigation::NavBar,
};

/// The state needed for the [get_edit_category_page] route handler.
#[derive(Debug, Clone)]
pub struct EditCategoryPageState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for the [update_category_endpoint] route handler.
#[derive(Debug, Clone)]
pub struct UpdateCategoryEndpointState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the edit form for `category_id` prefilled with its current values.
///
/// A missing ID renders the form empty with an error message instead of a 404
/// page, so the categories list stays one click away.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryPageState>,
) -> Result<Response, Error> {
    let connection = lock_database(&state.db_connection)?;
    let edit_endpoint = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let update_endpoint = format_endpoint(endpoints::PUT_CATEGORY, category_id);

    let view = match get_category(category_id, &connection) {
        Ok(category) => edit_category_view(
            &edit_endpoint,
            &update_endpoint,
            category.name.as_ref(),
            category.icon.as_deref().unwrap_or(""),
            "",
        ),
        Err(Error::NotFound) => {
            edit_category_view(&edit_endpoint, &update_endpoint, "", "", "Category not found")
        }
        Err(error) => {
            tracing::error!("could not load category {category_id}: {error}");
            edit_category_view(&edit_endpoint, &update_endpoint, "", "", "Failed to load category")
        }
    };

    Ok(view.into_response())
}

/// Update the name and icon of `category_id`.
///
/// Redirects to the categories page on success. A blank or duplicate name
/// re-renders the edit form with an error message.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(state): State<UpdateCategoryEndpointState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let connection = match lock_database(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_alert_response(),
    };

    let update_endpoint = format_endpoint(endpoints::PUT_CATEGORY, category_id);

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            let message = format!("Error: {error}");
            return edit_category_form_view(&update_endpoint, &form.name, &form.icon, &message)
                .into_response();
        }
    };

    let icon = form.icon.trim();
    let icon = (!icon.is_empty()).then_some(icon);

    match update_category(category_id, name, icon, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::UpdateMissingCategory) => error.into_alert_response(),
        Err(error @ Error::DuplicateCategoryName(_)) => {
            let message = format!("Error: {error}");
            edit_category_form_view(&update_endpoint, &form.name, &form.icon, &message)
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not update category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_category_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    category_name: &str,
    category_icon: &str,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form =
        edit_category_form_view(update_endpoint, category_name, category_icon, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_CLASS) { (form) }
    };

    base("Edit Category", &[], &content)
}

fn edit_category_form_view(
    update_endpoint: &str,
    category_name: &str,
    category_icon: &str,
    error_message: &str,
) -> Markup {
    html! {
        form hx-put=(update_endpoint) class="space-y-4 md:space-y-6 w-full" {
            div {
                label for="name" class=(FIELD_LABEL_CLASS) { "Category Name" }
                input id="name" type="text" name="name" placeholder="Category Name"
                    value=(category_name) required autofocus class=(TEXT_FIELD_CLASS);
            }

            div {
                label for="icon" class=(FIELD_LABEL_CLASS) { "Icon (optional)" }
                input id="icon" type="text" name="icon" placeholder="🍽️"
                    value=(category_icon) class=(TEXT_FIELD_CLASS);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(PRIMARY_BUTTON_CLASS) { "Update Category" }
        }
    }
}
