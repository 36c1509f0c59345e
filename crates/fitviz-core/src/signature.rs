//! Endpoint signature shortening for display.

use std::sync::LazyLock;

use regex::Regex;

/// `(...)` payload suffix; needs at least one character inside.
static PAYLOAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.+\)").unwrap());

/// Leading HTTP verb followed by a single space.
static HTTP_VERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(GET|POST|PUT|DELETE) ").unwrap());

/// `{...}` path-parameter placeholders, greedy across the string.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{.*\}").unwrap());

/// Reduce a raw endpoint signature such as `GET /api/{id}/orders(body)` to a
/// short display form such as `.../orders`.
///
/// Payload suffixes, the request verb and path placeholders are removed. If
/// what remains is a path (splits into more than one piece on `/`), only its
/// last piece is kept behind a `.../` marker.
pub fn simplify_signature(raw: &str) -> String {
    let without_payload = PAYLOAD.replace_all(raw, "");
    let without_verb = HTTP_VERB.replace(&without_payload, "");
    let signature = PLACEHOLDER.replace_all(&without_verb, "");

    match signature.rsplit_once('/') {
        Some((_, last)) => format!(".../{last}"),
        None => signature.into_owned(),
    }
}
