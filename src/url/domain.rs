use url::{Host, Url};

/// Second-level labels that form a registry suffix together with a two-letter
/// country code (e.g. `co.uk`, `com.au`). When the label before a two-letter
/// TLD is one of these, the registrable domain keeps three labels.
const SECOND_LEVEL_LABELS: &[&str] = &["ac", "co", "com", "edu", "gov", "net", "org"];

/// Reduces a link to its registrable top-level domain
///
/// Strips the scheme, subdomains, port, path, query, and fragment, leaving
/// only the registrable domain (`blog.example.com/post` -> `example.com`,
/// `shop.example.co.uk` -> `example.co.uk`). The result is lowercase.
///
/// Returns `None` for anything without an extractable domain: relative URLs,
/// malformed URLs, non-HTTP schemes, IP-address hosts, and dotless hosts.
/// A link that yields no domain is simply skipped by the caller.
///
/// # Examples
///
/// ```
/// use schema_scout::url::registrable_domain;
///
/// assert_eq!(
///     registrable_domain("https://blog.example.com/post"),
///     Some("example.com".to_string())
/// );
/// assert_eq!(registrable_domain("/relative/path"), None);
/// assert_eq!(registrable_domain("mailto:a@example.com"), None);
/// ```
pub fn registrable_domain(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    let host = match url.host()? {
        Host::Domain(d) => d.to_lowercase(),
        // IP addresses have no registrable domain
        Host::Ipv4(_) | Host::Ipv6(_) => return None,
    };

    reduce_host(&host)
}

/// Reduces a hostname to its registrable domain
fn reduce_host(host: &str) -> Option<String> {
    let host = host.trim_end_matches('.');
    let labels: Vec<&str> = host.split('.').collect();

    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return None;
    }

    let tld = labels[labels.len() - 1];
    let second = labels[labels.len() - 2];

    // example.co.uk style: keep three labels when available
    let keep = if labels.len() >= 3 && tld.len() == 2 && SECOND_LEVEL_LABELS.contains(&second) {
        3
    } else {
        2
    };

    Some(labels[labels.len() - keep..].join("."))
}

/// Builds the sitemap URL for a domain
///
/// Follows the `http://www.<domain>/sitemap.xml` convention. Hosts with a
/// port or IP-address hosts (local test servers) get no `www.` prefix since
/// it would not resolve.
pub fn sitemap_url(domain: &str) -> String {
    if domain.contains(':') || domain.parse::<std::net::IpAddr>().is_ok() {
        format!("http://{domain}/sitemap.xml")
    } else {
        format!("http://www.{domain}/sitemap.xml")
    }
}
