//! Decoding of raw search-node identifiers.
//!
//! A raw identifier looks like
//!
//! ```text
//! [Fault[uid=frontend:GET /cart#0>cart:POST /cart/{id}(payload)#1, mode=HTTP_ERROR(503)]]
//! ```
//!
//! The `uid` part is a `>`-separated path of hops. Each hop is
//! `destination[:signature][{call-stack}]#count`. The optional `mode` part
//! names the injected outcome.

use fitviz_error::{Error, Result};

use crate::signature::simplify_signature;

/// Display name used when the identifier carries no information at all.
pub const EMPTY_DISPLAY_NAME: &str = "&empty;";

/// Separator between the relevant hops of a multi-hop display name.
pub const HOP_SEPARATOR: &str = ">\n";

const UID_MARKER: &str = "uid=";
const MODE_SEPARATOR: &str = ", mode=";
const HTTP_ERROR_PREFIX: &str = "HTTP_ERROR(";

/// The three display fields extracted from one raw identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIdentifier {
    pub display_name: String,
    pub mode: String,
    pub signature: String,
}

impl ParsedIdentifier {
    fn empty() -> Self {
        Self {
            display_name: EMPTY_DISPLAY_NAME.to_string(),
            ..Self::default()
        }
    }

    fn name_only(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            ..Self::default()
        }
    }
}

/// One hop of the `uid` path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hop<'a> {
    destination: &'a str,
    signature: Option<&'a str>,
    /// Invocation count, kept verbatim: relevance compares it to `"0"` as text.
    count: &'a str,
}

impl<'a> Hop<'a> {
    fn parse(segment: &'a str) -> Result<Self> {
        let mut pieces = segment.split('#');
        let prefix = pieces.next().unwrap_or_default();
        let count = pieces.next().ok_or_else(|| {
            Error::parse_failed("missing '#' count separator")
                .with_context("segment", segment)
        })?;
        if pieces.next().is_some() {
            return Err(Error::parse_failed("multiple '#' separators")
                .with_context("segment", segment));
        }

        let mut names = prefix.split(':');
        let destination = names.next().unwrap_or_default();
        let signature = names.next();
        if names.next().is_some() {
            return Err(Error::parse_failed("multiple ':' separators")
                .with_context("segment", segment));
        }

        Ok(Self {
            destination,
            signature,
            count,
        })
    }

    fn has_count(&self) -> bool {
        self.count != "0"
    }

    fn display(&self) -> String {
        if self.has_count() {
            format!("{}#{}", self.destination, self.count)
        } else {
            self.destination.to_string()
        }
    }
}

/// Parse a raw identifier into display name, mode and simplified signature.
///
/// Identifiers without a `, mode=` part are shown verbatim (after removing
/// the `Fault`/bracket decoration). Every hop of a moded identifier must
/// carry exactly one `#count`; anything else is a `ParseFailed` error.
pub fn parse_identifier(raw: &str) -> Result<ParsedIdentifier> {
    parse_inner(raw).map_err(|err| {
        err.with_operation("identifier::parse")
            .with_context("identifier", raw)
    })
}

fn parse_inner(raw: &str) -> Result<ParsedIdentifier> {
    let cleaned = strip_decoration(raw);
    if cleaned.is_empty() {
        return Ok(ParsedIdentifier::empty());
    }

    let body = cleaned.strip_prefix(UID_MARKER).unwrap_or(&cleaned);

    let mut parts = body.split(MODE_SEPARATOR);
    let uid = parts.next().unwrap_or_default();
    let Some(mode) = parts.next() else {
        return Ok(ParsedIdentifier::name_only(body));
    };
    if parts.next().is_some() {
        return Err(Error::parse_failed("multiple ', mode=' separators"));
    }

    let segments: Vec<String> = uid.split('>').map(strip_braced).collect();
    let last = segments.len() - 1;

    let mut signature = "";
    let mut relevant = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let hop = Hop::parse(segment)?;
        if let Some(sig) = hop.signature {
            signature = sig;
        }
        if i == last || hop.has_count() {
            relevant.push(hop.display());
        }
    }

    Ok(ParsedIdentifier {
        display_name: relevant.join(HOP_SEPARATOR),
        mode: unwrap_mode(mode).to_string(),
        signature: simplify_signature(signature),
    })
}

/// Drop every `Fault` word and every square bracket.
fn strip_decoration(raw: &str) -> String {
    raw.replace("Fault", "")
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect()
}

/// Remove the span from the first `{` to the last `}` after it.
fn strip_braced(segment: &str) -> String {
    let Some(open) = segment.find('{') else {
        return segment.to_string();
    };
    match segment.rfind('}') {
        Some(close) if close > open => {
            let mut stripped = String::with_capacity(segment.len());
            stripped.push_str(&segment[..open]);
            stripped.push_str(&segment[close + 1..]);
            stripped
        }
        _ => segment.to_string(),
    }
}

/// `HTTP_ERROR(503)` becomes `503`; other modes, parentheses included, are
/// kept as written.
fn unwrap_mode(mode: &str) -> &str {
    match mode.strip_prefix(HTTP_ERROR_PREFIX) {
        Some(inner) => inner.strip_suffix(')').unwrap_or(inner),
        None => mode,
    }
}
