//! Match and domain extraction from loaded pages
//!
//! Two scans run over every visited page: one for inline script elements
//! carrying schema.org structured data, one for hyperlinks pointing at
//! domains the crawl has not seen yet.

use crate::crawler::frontier::Frontier;
use crate::storage::SchemaMatch;
use crate::url::registrable_domain;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Marker substring identifying a structured-data script block
///
/// A coarse case-sensitive substring check, not a structural JSON
/// validation.
const SCHEMA_MARKER: &str = "schema.org";

/// Scans a page for schema.org script blocks
///
/// Every inline script element whose text contains [`SCHEMA_MARKER`]
/// contributes exactly one match carrying the page URL and the raw script
/// content. Matches are returned in document order.
pub fn extract_matches(document: &Html, page_url: &str) -> Vec<SchemaMatch> {
    let mut matches = Vec::new();

    if let Ok(selector) = Selector::parse("script") {
        for script in document.select(&selector) {
            let content = script.text().collect::<String>();
            if content.contains(SCHEMA_MARKER) {
                matches.push(SchemaMatch {
                    url: page_url.to_string(),
                    json: content,
                });
            }
        }
    }

    matches
}

/// Harvests outbound links into newly discovered domains
///
/// Every hyperlink with a non-empty target is reduced to its registrable
/// domain; links without an extractable domain (relative, malformed,
/// non-HTTP) are skipped silently. The result contains only domains not
/// already explored or pending, deduplicated in document order. The caller
/// enqueues and persists exactly this set.
pub fn harvest_domains(document: &Html, frontier: &Frontier) -> Vec<String> {
    let mut discovered = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for link in document.select(&selector) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if href.is_empty() {
                continue;
            }

            let Some(domain) = registrable_domain(href) else {
                continue;
            };

            if frontier.is_known_domain(&domain) || !seen.insert(domain.clone()) {
                continue;
            }

            discovered.push(domain);
        }
    }

    discovered
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://example.com/a";

    #[test]
    fn test_three_scripts_two_matches_in_document_order() {
        let html = r#"<html><body>
            <script>{"@context": "https://schema.org", "@type": "Article", "n": 1}</script>
            <script>console.log("analytics");</script>
            <script>{"@context": "https://schema.org", "@type": "Person", "n": 3}</script>
        </body></html>"#;
        let document = Html::parse_document(html);

        let matches = extract_matches(&document, PAGE_URL);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].url, PAGE_URL);
        assert_eq!(matches[1].url, PAGE_URL);
        assert!(matches[0].json.contains(r#""n": 1"#));
        assert!(matches[1].json.contains(r#""n": 3"#));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let html = r#"<html><body><script>{"@context": "https://SCHEMA.ORG"}</script></body></html>"#;
        let document = Html::parse_document(html);

        assert!(extract_matches(&document, PAGE_URL).is_empty());
    }

    #[test]
    fn test_one_match_per_script_element() {
        let html = r#"<html><body>
            <script>schema.org mentioned twice: schema.org</script>
        </body></html>"#;
        let document = Html::parse_document(html);

        assert_eq!(extract_matches(&document, PAGE_URL).len(), 1);
    }

    #[test]
    fn test_no_scripts_no_matches() {
        let document = Html::parse_document("<html><body><p>plain</p></body></html>");
        assert!(extract_matches(&document, PAGE_URL).is_empty());
    }

    #[test]
    fn test_harvest_new_domains() {
        let html = r#"<html><body>
            <a href="https://other.org/page">one</a>
            <a href="https://news.example.net/story">two</a>
        </body></html>"#;
        let document = Html::parse_document(html);
        let frontier = Frontier::new();

        let discovered = harvest_domains(&document, &frontier);

        assert_eq!(discovered, vec!["other.org", "example.net"]);
    }

    #[test]
    fn test_harvest_skips_relative_and_malformed_links() {
        let html = r##"<html><body>
            <a href="/about">relative</a>
            <a href="#top">fragment</a>
            <a href="mailto:hi@example.com">mail</a>
            <a href="https://valid.com/">valid</a>
        </body></html>"##;
        let document = Html::parse_document(html);
        let frontier = Frontier::new();

        assert_eq!(harvest_domains(&document, &frontier), vec!["valid.com"]);
    }

    #[test]
    fn test_harvest_excludes_explored_and_pending() {
        let html = r#"<html><body>
            <a href="https://done.com/">explored</a>
            <a href="https://queued.com/">pending</a>
            <a href="https://fresh.com/">new</a>
        </body></html>"#;
        let document = Html::parse_document(html);
        let mut frontier = Frontier::new();
        frontier.mark_explored("done.com");
        frontier.enqueue_domain("queued.com");

        assert_eq!(harvest_domains(&document, &frontier), vec!["fresh.com"]);
    }

    #[test]
    fn test_harvest_dedups_within_page() {
        let html = r#"<html><body>
            <a href="https://other.org/1">a</a>
            <a href="https://www.other.org/2">b</a>
        </body></html>"#;
        let document = Html::parse_document(html);
        let frontier = Frontier::new();

        assert_eq!(harvest_domains(&document, &frontier), vec!["other.org"]);
    }
}
