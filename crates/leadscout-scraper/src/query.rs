//! Search URL construction for the external directory.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use leadscout_core::SearchQuery;

/// Form-style query encoding: keep unreserved characters, keep spaces for a
/// later `+` substitution, percent-encode everything else.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the directory search URL for a query.
///
/// Keywords go into the `ss` parameter and location into `cq`, both
/// plus/percent-encoded so no raw spaces remain in the final URL.
#[must_use]
pub fn search_url(base: &str, query: &SearchQuery) -> String {
    format!(
        "{base}?ss={}&cq={}",
        encode_param(query.keywords()),
        encode_param(query.location())
    )
}

fn encode_param(value: &str) -> String {
    utf8_percent_encode(value, FORM_ENCODE_SET)
        .to_string()
        .replace(' ', "+")
}
