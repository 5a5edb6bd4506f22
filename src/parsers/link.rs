use url::Url;

const NON_PAGE_SCHEMES: [&str; 4] = ["mailto", "javascript", "tel", "data"];

/// Resolve a job link against the page it was found on.
///
/// Absolute `http`/`https` URLs pass through. Protocol-relative links take the
/// page's scheme. Links that do not point at a page (`mailto:`, `javascript:`,
/// `tel:`, `data:`) resolve to an empty link. Anything else is appended to the
/// page URL with exactly one `/` between them, so `/careers/123` on
/// `https://example.com/jobs` becomes `https://example.com/jobs/careers/123`.
pub fn resolve_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    if let Ok(url) = Url::parse(href) {
        match url.scheme() {
            "http" | "https" => return href.to_string(),
            scheme if NON_PAGE_SCHEMES.contains(&scheme) => return String::new(),
            // host:port without a scheme parses with the host as scheme
            _ => {}
        }
    }

    if href.starts_with("//") {
        if let Ok(joined) = Url::parse(base_url).and_then(|base| base.join(href)) {
            return joined.to_string();
        }
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
