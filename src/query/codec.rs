//! Query string encoding and decoding
//!
//! Decoding follows `application/x-www-form-urlencoded` rules (`+` is a
//! space, invalid UTF-8 is replaced). Encoding leaves unreserved characters
//! and `,` as-is so id lists stay readable: `brandId=b1,b2,b3`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in keys and values
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',')
    .remove(b' ');

/// Decode one key or value
#[must_use]
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Encode one key or value, writing spaces as `+`
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT)
        .to_string()
        .replace(' ', "+")
}

/// Split a query string into decoded pairs, in order
///
/// A leading `?` is ignored. A segment without `=` (a bare flag such as
/// `?preview`) has no value, which is distinct from an empty one (`preview=`).
#[must_use]
pub fn parse_pairs(query: &str) -> Vec<(String, Option<String>)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key), Some(decode_component(value))),
            None => (decode_component(segment), None),
        })
        .collect()
}

/// Join pairs into an encoded query string (no leading `?`)
///
/// Pairs without a value are written as a bare key.
#[must_use]
pub fn serialize_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}={}", encode_component(key), encode_component(value)),
            None => encode_component(key),
        })
        .collect::<Vec<_>>()
        .join("&")
}
