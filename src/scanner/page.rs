// src/scanner/page.rs
// =============================================================================
// This module scans one fetched document for the target word.
//
// How it works:
// 1. Split the raw content on whitespace (no HTML parsing, by design)
// 2. For a link-bearing token, extract the URL and remember any anchor text
//    that trailed the closing tag on the same token
// 3. Match every token (or its trailing anchor text) against the target word,
//    case-insensitively, as a substring
//
// The scan is a one-shot pure function: no state survives the call, and
// scanning the same content twice gives the same outcome. All crawl state
// lives in the session, not here.
// =============================================================================

use url::Url;

use super::link;

// What the scanner learned about one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Whether the target word appeared anywhere in the token stream
    pub matched: bool,
    /// Absolute URLs discovered in link-bearing tokens, in document order
    pub links: Vec<Url>,
}

// Scans document content for the target word and outbound links
//
// Parameters:
//   content: the raw page text (borrowed, we only read it)
//   target: the word to hunt for (folded to lowercase here, so callers can
//           pass any casing)
//
// Returns: ScanOutcome with the match verdict and every discovered link
//
// Matching policy: a token matches when its lowercased form contains the
// lowercased target as a substring. Substring matching means a link token
// like href="http://bacon.example.com/" counts as a hit for "bacon" even
// though no token equals the target exactly.
//
// One subtlety inherited from the matching policy: when a link token carries
// anchor text after the closing tag (href="...">Word), that anchor text
// replaces the token for the text test. Link tokens without anchor text are
// tested whole, URL and all.
pub fn scan(content: &str, target: &str) -> ScanOutcome {
    let target = target.to_lowercase();
    let mut matched = false;
    let mut links = Vec::new();

    for token in content.split_whitespace() {
        let mut text = token;

        if link::is_link_token(token) {
            let (discovered, remainder) = link::extract_link(token);
            if let Some(url) = discovered {
                links.push(url);
            }
            if let Some(anchor) = remainder {
                text = anchor;
            }
        }

        if text.to_lowercase().contains(&target) {
            matched = true;
        }
    }

    ScanOutcome { matched, links }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is split_whitespace?
//    - An iterator over the chunks of a string separated by any whitespace
//    - It never allocates; each token is a &str borrowing from the content
//    - This is the whole tokenizer: the document is just words to us
//
// 2. Why to_lowercase on every token?
//    - The target word is matched case-insensitively
//    - "Baconator".to_lowercase() is "baconator", which contains "bacon"
//
// 3. Why does `text` shadow the token?
//    - For a link token with anchor text (href="...">More), the anchor text
//      is the part a reader actually sees, so that is what we match
//    - Reassigning a new &str to `text` doesn't copy anything
//
// 4. Why doesn't a malformed link stop the scan?
//    - extract_link returns Option, not Result
//    - A href that doesn't parse is normal for this shallow heuristic, so we
//      just move on to the next token
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_word_matches() {
        let outcome = scan("crispy bacon strips", "bacon");
        assert!(outcome.matched);
        assert!(outcome.links.is_empty());
    }

    #[test]
    fn test_substring_match() {
        // No token equals "bacon", but one contains it
        let outcome = scan("Baconator is great", "bacon");
        assert!(outcome.matched);
    }

    #[test]
    fn test_case_folded_match() {
        let outcome = scan("BACON everywhere", "Bacon");
        assert!(outcome.matched);
    }

    #[test]
    fn test_no_match() {
        let outcome = scan("nothing to see here", "bacon");
        assert!(!outcome.matched);
    }

    #[test]
    fn test_discovers_link() {
        let content = r#"<a href="http://example.com/page">visit</a>"#;
        let outcome = scan(content, "bacon");
        assert_eq!(outcome.links.len(), 1);
        assert_eq!(outcome.links[0].as_str(), "http://example.com/page");
    }

    #[test]
    fn test_target_in_link_url_counts() {
        // The link token has no anchor text, so the whole token is matched
        // and the URL itself contains the target
        let content = r#"href="http://bacon.example.com/""#;
        let outcome = scan(content, "bacon");
        assert!(outcome.matched);
        assert_eq!(outcome.links.len(), 1);
    }

    #[test]
    fn test_anchor_text_matches() {
        let content = r#"href="http://plain.example.com/">bacon"#;
        let outcome = scan(content, "bacon");
        assert!(outcome.matched);
        assert_eq!(outcome.links.len(), 1);
    }

    #[test]
    fn test_anchor_text_replaces_url_for_matching() {
        // With anchor text present, the URL part is no longer matched
        let content = r#"href="http://bacon.example.com/">salad"#;
        let outcome = scan(content, "bacon");
        assert!(!outcome.matched);
        assert_eq!(outcome.links.len(), 1);
    }

    #[test]
    fn test_malformed_link_resilience() {
        // One well-formed link and one malformed one: exactly one discovery,
        // no error, and the rest of the page is still scanned
        let content = r#"href="http//broken" href="http://good.example.com/" bacon"#;
        let outcome = scan(content, "bacon");
        assert_eq!(outcome.links.len(), 1);
        assert_eq!(outcome.links[0].as_str(), "http://good.example.com/");
        assert!(outcome.matched);
    }

    #[test]
    fn test_entity_unescaping() {
        let content = r#"href="http://example.com/a&amp;b""#;
        let outcome = scan(content, "zzz");
        assert_eq!(outcome.links.len(), 1);
        assert!(outcome.links[0].as_str().contains("a&b"));
    }

    #[test]
    fn test_rescan_is_idempotent() {
        let content = r#"some words href="http://example.com/">bacon and more"#;
        let first = scan(content, "bacon");
        let second = scan(content, "bacon");
        assert_eq!(first, second);
    }

    #[test]
    fn test_multiple_links_in_document_order() {
        let content = r#"
            intro href="http://a.example.com/" middle
            href="http://b.example.com/">next outro
        "#;
        let outcome = scan(content, "zzz");
        let urls: Vec<_> = outcome.links.iter().map(|u| u.as_str()).collect();
        assert_eq!(urls, vec!["http://a.example.com/", "http://b.example.com/"]);
    }
}
