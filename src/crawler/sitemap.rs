//! Recursive sitemap-index resolution
//!
//! A sitemap document is either an index (a `sitemapindex` element listing
//! child sitemap URLs in `loc` elements) or a flat sitemap whose `loc`
//! entries are page URLs. Index documents are expanded through a worklist
//! with a visited set, so a self-referencing index terminates instead of
//! recursing forever.

use crate::crawler::fetcher::PageLoader;
use crate::crawler::frontier::Frontier;
use crate::ScoutError;
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};

/// Expands a domain's sitemap into the frontier's site queue
///
/// Child sitemaps are resolved breadth-first in document order. A child that
/// fails to load is logged and skipped; it does not abort resolution. A
/// document with zero `loc` entries contributes nothing, which leaves the
/// site queue empty for domains without usable sitemaps.
pub async fn resolve_sitemap(
    loader: &PageLoader,
    sitemap_url: &str,
    frontier: &mut Frontier,
) -> Result<(), ScoutError> {
    let (Ok(loc_selector), Ok(index_selector)) =
        (Selector::parse("loc"), Selector::parse("sitemapindex"))
    else {
        return Ok(());
    };

    let mut worklist = VecDeque::from([sitemap_url.to_string()]);
    let mut visited: HashSet<String> = HashSet::new();

    while let Some(url) = worklist.pop_front() {
        if !visited.insert(url.clone()) {
            tracing::debug!("Skipping already-visited sitemap {}", url);
            continue;
        }

        let document = match loader.load(&url).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Could not load sitemap {}: {}", url, e);
                continue;
            }
        };

        if document.select(&index_selector).next().is_some() {
            // Index document: every loc is a child sitemap
            for child in loc_texts(&document, &loc_selector) {
                tracing::debug!("Found child sitemap {}", child);
                worklist.push_back(child);
            }
        } else {
            // Flat sitemap: every loc is a page URL
            for site in loc_texts(&document, &loc_selector) {
                frontier.enqueue_site(&site);
            }
        }
    }

    Ok(())
}

/// Collects trimmed, non-empty `loc` text contents in document order
fn loc_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_loader() -> PageLoader {
        let timeout = Duration::from_millis(100);
        let client = build_http_client("test-scout/1.0", timeout).unwrap();
        PageLoader::new(client, timeout)
    }

    fn flat_sitemap(urls: &[&str]) -> String {
        let entries: String = urls
            .iter()
            .map(|u| format!("<url><loc>{u}</loc></url>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#
        )
    }

    fn sitemap_index(children: &[&str]) -> String {
        let entries: String = children
            .iter()
            .map(|u| format!("<sitemap><loc>{u}</loc></sitemap>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</sitemapindex>"#
        )
    }

    #[tokio::test]
    async fn test_flat_sitemap_populates_site_queue() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(flat_sitemap(&[
                &format!("{base}/a"),
                &format!("{base}/b"),
            ])))
            .mount(&server)
            .await;

        let mut frontier = Frontier::new();
        resolve_sitemap(&test_loader(), &format!("{base}/sitemap.xml"), &mut frontier)
            .await
            .unwrap();

        assert_eq!(frontier.sites_remaining(), 2);
        assert_eq!(frontier.next_site(), Some(format!("{base}/a")));
        assert_eq!(frontier.next_site(), Some(format!("{base}/b")));
    }

    #[tokio::test]
    async fn test_index_resolves_both_children() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&[
                &format!("{base}/sitemap-posts.xml"),
                &format!("{base}/sitemap-pages.xml"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sitemap-posts.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(flat_sitemap(&[&format!("{base}/post-1")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sitemap-pages.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(flat_sitemap(&[&format!("{base}/about")])),
            )
            .mount(&server)
            .await;

        let mut frontier = Frontier::new();
        resolve_sitemap(&test_loader(), &format!("{base}/sitemap.xml"), &mut frontier)
            .await
            .unwrap();

        assert_eq!(frontier.sites_remaining(), 2);
        assert_eq!(frontier.next_site(), Some(format!("{base}/post-1")));
        assert_eq!(frontier.next_site(), Some(format!("{base}/about")));
    }

    #[tokio::test]
    async fn test_self_referencing_index_terminates() {
        let server = MockServer::start().await;
        let base = server.uri();
        // The index lists itself as its only child
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(sitemap_index(&[&format!("{base}/sitemap.xml")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut frontier = Frontier::new();
        resolve_sitemap(&test_loader(), &format!("{base}/sitemap.xml"), &mut frontier)
            .await
            .unwrap();

        assert_eq!(frontier.sites_remaining(), 0);
    }

    #[tokio::test]
    async fn test_unloadable_child_is_skipped() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_index(&[
                &format!("{base}/missing.xml"),
                &format!("{base}/good.xml"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/good.xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(flat_sitemap(&[&format!("{base}/page")])),
            )
            .mount(&server)
            .await;

        let mut frontier = Frontier::new();
        resolve_sitemap(&test_loader(), &format!("{base}/sitemap.xml"), &mut frontier)
            .await
            .unwrap();

        assert_eq!(frontier.sites_remaining(), 1);
    }

    #[tokio::test]
    async fn test_empty_sitemap_yields_no_sites() {
        let server = MockServer::start().await;
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(flat_sitemap(&[])))
            .mount(&server)
            .await;

        let mut frontier = Frontier::new();
        resolve_sitemap(&test_loader(), &format!("{base}/sitemap.xml"), &mut frontier)
            .await
            .unwrap();

        assert_eq!(frontier.sites_remaining(), 0);
    }
}
