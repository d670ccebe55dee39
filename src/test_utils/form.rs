//! Assertions on forms and their inputs.

use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

#[track_caller]
pub(crate) fn form_element(html: &Html) -> ElementRef<'_> {
    html.select(&selector("form"))
        .next()
        .expect("no form found in the document")
}

#[track_caller]
pub(crate) fn assert_form_submits_to(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form.value().attr(attribute);

    assert_eq!(
        got,
        Some(endpoint),
        "want form with {attribute}=\"{endpoint}\""
    );
}

#[track_caller]
fn find_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    form.select(&selector("input"))
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("no input named \"{name}\" found"))
}

#[track_caller]
fn assert_attribute(input: &ElementRef<'_>, attribute: &str, want: &str) {
    let got = input.value().attr(attribute).unwrap_or_default();

    assert_eq!(
        got, want,
        "want input with {attribute}=\"{want}\", got {got:?}"
    );
}

#[track_caller]
fn assert_required(input: &ElementRef<'_>, name: &str) {
    assert!(
        input.value().attr("required").is_some(),
        "want the \"{name}\" input to be required"
    );
}

#[track_caller]
pub(crate) fn assert_required_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = find_input(form, name);

    assert_attribute(&input, "type", type_);
    assert_required(&input, name);
}

#[track_caller]
pub(crate) fn assert_required_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let input = find_input(form, name);

    assert_attribute(&input, "type", type_);
    assert_attribute(&input, "value", value);
    assert_required(&input, name);
}

#[track_caller]
pub(crate) fn assert_optional_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = find_input(form, name);

    assert_attribute(&input, "type", type_);
    assert!(
        input.value().attr("required").is_none(),
        "want the \"{name}\" input to not be required"
    );
}

#[track_caller]
pub(crate) fn assert_optional_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let input = find_input(form, name);

    assert_attribute(&input, "type", type_);
    assert_attribute(&input, "value", value);
}

/// Assert that `form` contains a `<select>` named `name` whose options are
/// labelled `want_options`, in order.
#[track_caller]
pub(crate) fn assert_select_with_options(
    form: &ElementRef<'_>,
    name: &str,
    want_options: &[&str],
) {
    let select = form
        .select(&selector("select"))
        .find(|select| select.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("no select named \"{name}\" found"));

    let got_options: Vec<String> = select
        .select(&selector("option"))
        .map(|option| option.text().collect::<String>().trim().to_owned())
        .collect();
    assert_eq!(
        got_options, want_options,
        "want select \"{name}\" with options {want_options:?}, got {got_options:?}"
    );
}

#[track_caller]
pub(crate) fn assert_submit_button(form: &ElementRef<'_>) {
    find_submit_button(form);
}

#[track_caller]
pub(crate) fn assert_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let button = find_submit_button(form);

    let got_text: String = button.text().collect();
    assert_eq!(got_text.trim(), text);
}

#[track_caller]
fn find_submit_button<'a>(form: &ElementRef<'a>) -> ElementRef<'a> {
    let button = form
        .select(&selector("button"))
        .next()
        .expect("no button found in the form");
    let button_type = button.value().attr("type").unwrap_or_default();
    assert_eq!(button_type, "submit", "want a button with type=\"submit\"");

    button
}

#[track_caller]
pub(crate) fn assert_error_text(form: &ElementRef<'_>, want_error_message: &str) {
    let message: String = form
        .select(&selector("p"))
        .next()
        .expect("no error message found")
        .text()
        .collect();

    assert_eq!(message.trim(), want_error_message);
}
