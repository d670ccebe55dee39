//! Shared HTML layout, styles and formatting helpers for the maud views.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Links and buttons
pub const LINK_CLASS: &str = "text-emerald-600 hover:text-emerald-500 \
    dark:text-emerald-500 dark:hover:text-emerald-400 underline";

pub const PRIMARY_BUTTON_CLASS: &str = "w-full px-4 py-2 bg-emerald-500 \
    dark:bg-emerald-600 disabled:bg-emerald-700 hover:enabled:bg-emerald-600 \
    hover:enabled:dark:bg-emerald-700 text-white rounded";

pub const DELETE_BUTTON_CLASS: &str = "underline text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 bg-transparent \
    cursor-pointer border-none";

// Form fields
pub const FORM_CONTAINER_CLASS: &str = "flex flex-col items-center max-w-md \
    px-6 py-8 mx-auto lg:py-0 text-gray-900 dark:text-white";
pub const FIELD_LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_FIELD_CLASS: &str = "block w-full p-2.5 rounded text-sm bg-gray-50 \
    dark:bg-gray-700 text-gray-900 dark:text-white disabled:text-gray-500 \
    border border-gray-300 dark:border-gray-600 dark:placeholder-gray-400 \
    focus:ring-emerald-600 focus:border-emerald-600 \
    focus:dark:border-emerald-500 focus:dark:ring-emerald-500";
pub const RADIO_GROUP_CLASS: &str = "flex flex-col gap-2";
pub const RADIO_INPUT_CLASS: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-emerald-600 border-gray-300 dark:border-gray-600 focus-visible:ring-2 \
    focus-visible:ring-emerald-500 focus-visible:ring-offset-2 focus-visible:ring-offset-white \
    focus-visible:dark:ring-offset-gray-900";
pub const RADIO_LABEL_CLASS: &str = "flex-1 rounded border border-gray-300 dark:border-gray-600 \
    bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium text-gray-700 \
    dark:text-white cursor-pointer transition hover:border-gray-400 \
    hover:bg-gray-50 hover:text-gray-900 hover:dark:border-gray-500 \
    hover:dark:bg-gray-600 active:scale-[0.99] \
    peer-checked:border-emerald-600 peer-checked:bg-emerald-50 \
    peer-checked:text-emerald-700 peer-checked:shadow-sm \
    peer-checked:dark:border-emerald-500 peer-checked:dark:bg-emerald-600/20 \
    peer-checked:dark:text-emerald-200";

// Tables
pub const TABLE_HEADER_CLASS: &str = "text-xs text-gray-700 uppercase bg-gray-50 \
    dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_CLASS: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_CLASS: &str = "px-6 py-4";

pub const TABLE_WRAPPER_CLASS: &str = "hidden w-full overflow-x-auto dark:bg-gray-800 \
    lg:block lg:w-full lg:max-w-5xl lg:mx-auto lg:overflow-visible";

pub const TABLE_CLASS: &str = "w-full text-sm text-left text-gray-500 \
    rtl:text-right dark:text-gray-400";

// Badges
pub const CATEGORY_BADGE_CLASS: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-emerald-800 bg-emerald-100 rounded-full \
    dark:bg-emerald-900 dark:text-emerald-300";

// Page layout
pub const PAGE_CONTAINER_CLASS: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-5 text-gray-900 dark:text-white";

const BODY_CLASS: &str = "container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900 \
    pb-[calc(5rem+env(safe-area-inset-bottom))] lg:pb-0";

const ALERT_CONTAINER_STYLE: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";

/// An extra element for the `<head>` of [base].
pub enum HeadElement {
    /// A script loaded by URL.
    Script(String),
    /// Inline JavaScript.
    InlineScript(PreEscaped<String>),
    /// An inline stylesheet.
    InlineStyle(PreEscaped<String>),
}

/// The shared page shell: scripts, styles and the fixed alert container.
pub fn base(title: &str, extra_head: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - BiYú" }

                script src="https://cdn.tailwindcss.com" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js" {}

                style {
                    r#"
                    #indicator.htmx-indicator { display: none; }

                    #indicator.htmx-request .htmx-indicator,
                    #indicator.htmx-request.htmx-indicator { display: inline; }

                    /* ECharts tooltips sit under the fixed bottom nav but over the page. */
                    .echarts-tooltip { z-index: 30 !important; }
                    "#
                }

                @for element in extra_head {
                    @match element {
                        HeadElement::Script(url) => script src=(url) {}
                        HeadElement::InlineScript(code) => script { (code) }
                        HeadElement::InlineStyle(css) => style { (css) }
                    }
                }
            }

            body hx-ext="response-targets" class=(BODY_CLASS) {
                (content)

                // Alert container for out-of-band swaps
                div id="alert-container" class="hidden w-full max-w-md px-4"
                    style=(ALERT_CONTAINER_STYLE) {}
            }
        }
    }
}

// 404/500 page styles, adapted from https://flowbite.com/blocks/marketing/404/
const ERROR_CODE_CLASS: &str = "mb-4 text-7xl tracking-tight font-extrabold \
    lg:text-9xl text-emerald-600 dark:text-emerald-500";
const ERROR_TITLE_CLASS: &str = "mb-4 text-3xl md:text-4xl tracking-tight \
    font-bold text-gray-900 dark:text-white";
const ERROR_FIX_CLASS: &str = "mb-4 text-1xl md:text-2xl tracking-tight \
    text-gray-900 dark:text-white";
const ERROR_HOME_LINK_CLASS: &str = "inline-flex text-white bg-emerald-600 \
    hover:bg-emerald-800 focus:ring-4 focus:outline-hidden \
    focus:ring-emerald-300 font-medium rounded text-sm px-5 \
    py-2.5 text-center dark:focus:ring-emerald-900 my-4";

/// A full page with a large status code, a description and a suggested fix.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html! {
        section class="bg-white dark:bg-gray-900" {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6" {
                div class="mx-auto max-w-screen-sm text-center" {
                    h1 class=(ERROR_CODE_CLASS) { (header) }
                    p class=(ERROR_TITLE_CLASS) { (description) }
                    p class=(ERROR_FIX_CLASS) { (fix) }
                    a href="/" class=(ERROR_HOME_LINK_CLASS) { "Back to the dashboard" }
                }
            }
        }
    };

    base(title, &[], &content)
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// CSS that floats a peso sign over number inputs wrapped in a
/// `.currency-input` div. Shared by the forms that take amounts.
pub fn currency_input_styles() -> HeadElement {
    HeadElement::InlineStyle(PreEscaped(
        r#"
        .currency-input { position: relative; display: inline-block; }
        .currency-input input[type="number"] { padding-left: 1.4rem; }
        .currency-input::before {
            content: '$'; position: absolute; left: 0.6rem; top: 50%;
            transform: translateY(-50%); pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

/// "Delete" button that asks for confirmation before issuing an HTMX delete.
///
/// On success the element matched by `hx_target` is swapped with `hx_swap`,
/// removing the row or card in place. Errors land in the alert container.
pub fn delete_action_button(
    delete_url: &str,
    confirm_message: &str,
    hx_target: &str,
    hx_swap: &str,
) -> Markup {
    html! {
        button type="button" class=(DELETE_BUTTON_CLASS)
            hx-delete=(delete_url) hx-confirm=(confirm_message) hx-target=(hx_target)
            hx-swap=(hx_swap) hx-target-error="#alert-container" { "Delete" }
    }
}

/// "Edit" link and "Delete" button pair for listing pages.
pub fn edit_delete_action_links(
    edit_url: &str,
    delete_url: &str,
    confirm_message: &str,
    hx_target: &str,
    hx_swap: &str,
) -> Markup {
    html! {
        a href=(edit_url) class=(LINK_CLASS) { "Edit" }
        (delete_action_button(delete_url, confirm_message, hx_target, hx_swap))
    }
}

/// Format `number` as a currency string with cents, e.g. "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static CENT_FORMATTERS: OnceLock<(Formatter, Formatter)> = OnceLock::new();
    let formatters = CENT_FORMATTERS.get_or_init(|| currency_formatters(2));

    let Some(mut formatted) = format_magnitude(number, formatters) else {
        return "$0.00".to_owned();
    };

    // numfmt drops a trailing zero cent digit: 12.3 comes back as "12.3".
    if formatted.as_bytes()[formatted.len() - 3] != b'.' {
        formatted.push('0');
    }

    formatted
}

/// Format `number` as a whole-peso currency string, e.g. "$1,235".
pub fn format_currency_rounded(number: f64) -> String {
    static WHOLE_FORMATTERS: OnceLock<(Formatter, Formatter)> = OnceLock::new();
    let formatters = WHOLE_FORMATTERS.get_or_init(|| currency_formatters(0));

    format_magnitude(number.round(), formatters).unwrap_or_else(|| "$0".to_owned())
}

/// None when `number` is exactly zero, which numfmt renders as a bare "0".
fn format_magnitude(number: f64, formatters: &(Formatter, Formatter)) -> Option<String> {
    let (positive, negative) = formatters;

    if number < 0.0 {
        Some(negative.fmt_string(number.abs()))
    } else if number > 0.0 {
        Some(positive.fmt_string(number))
    } else {
        None
    }
}

// The sign has to live in the prefix because numfmt formats magnitudes.
fn currency_formatters(decimals: u8) -> (Formatter, Formatter) {
    let build = |prefix| {
        Formatter::currency(prefix)
            .unwrap()
            .precision(Precision::Decimals(decimals))
    };

    (build("$"), build("-$"))
}

/// A span showing `amount` in whole pesos, with the exact amount in the
/// tooltip.
pub fn currency_with_tooltip(amount: f64) -> Markup {
    html! {
        span title=(format_currency(amount)) { (format_currency_rounded(amount)) }
    }
}

/// An underlined link for use in running text.
pub fn inline_link(url: &str, text: &str) -> Markup {
    html! {
        a href=(url) class=(LINK_CLASS) { (text) }
    }
}
