// src/scanner/link.rs
// =============================================================================
// This module pulls a URL out of a single link-bearing token.
//
// A token is "link-bearing" when it starts with the literal marker href="
// followed by http. That is a deliberately shallow heuristic: we never build
// a DOM. It misses links split across whitespace, links in single quotes and
// relative URLs, and it can misfire on the same substring in plain text.
//
// The payload sits between the marker and the first closing quote. The quote
// may be followed by a tag closure like >, and whatever comes after THAT on
// the same token is anchor text we hand back to the caller, because it still
// needs to be matched against the target word.
// =============================================================================

use url::Url;

// The literal prefix that makes a token a link candidate
pub const LINK_MARKER: &str = "href=\"";

// Returns true if this token looks like it carries an absolute http(s) link
//
// "http" also covers "https" as a prefix, so both schemes pass here.
pub fn is_link_token(token: &str) -> bool {
    token.starts_with("href=\"http")
}

// Extracts the URL payload and the trailing anchor text from a token
//
// Parameters:
//   token: one whitespace-delimited token, e.g. href="http://a.test/">More
//
// Returns: (Option<Url>, Option<&str>)
//   - Some(url) if the payload parses as a well-formed absolute URL
//   - Some(anchor_text) if anything followed the closing quote/bracket
//
// A payload that fails to parse yields None, never an error. Malformed and
// javascript-ish hrefs are an expected outcome of this heuristic, and one bad
// token must not abort the scan of the rest of the page.
pub fn extract_link(token: &str) -> (Option<Url>, Option<&str>) {
    let rest = match token.strip_prefix(LINK_MARKER) {
        Some(rest) => rest,
        None => return (None, None),
    };

    // Split at the first closing quote to isolate the URL payload.
    // Tokens with no closing quote keep the whole remainder as payload.
    let (payload, mut after) = match rest.find('"') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };

    // The quote is often followed by the tag closure, e.g. ">Read
    after = after.strip_prefix('>').unwrap_or(after);
    let remainder = if after.is_empty() { None } else { Some(after) };

    // Documents escape & as &amp; inside attributes; undo that before parsing
    let unescaped = payload.replace("&amp;", "&");
    let link = Url::parse(&unescaped).ok();

    (link, remainder)
}
