//! Assertion helpers and HTML parsers shared by the route handler tests.

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_error_text, assert_form_submits_to, assert_optional_input,
    assert_optional_input_with_value, assert_required_input, assert_required_input_with_value,
    assert_select_with_options, assert_submit_button, assert_submit_button_with_text, form_element,
};
pub(crate) use html::{assert_well_formed, first_paragraph_text, parse_fragment, parse_page};
pub(crate) use http::{assert_hx_redirects_to, assert_media_type, assert_ok, header_value};
