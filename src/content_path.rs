/// Content path extraction and normalization for AEM URLs
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Console chrome followed by `.html` and the repository path it shows
static CHROME_PREFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^/(?:editor|sites|siteadmin|damadmin|assets|aem/experience-fragments|aem/forms)\.html(/content/.*)$",
    )
    .expect("chrome pattern is valid")
});

const EDITOR_CHROME: &str = "/editor.html";
const FORMS_ROOTS: [&str; 2] = ["/content/forms/af/", "/content/dam/formsanddocuments/"];

/// Extract the canonical `/content/...` path a URL addresses
///
/// Algorithm:
/// 1. If the query contains `wcmmode=disabled` the path is already the
///    published content path → return it verbatim
/// 2. If the path is `/<chrome>.html/content/...` → return the `/content/...` part
/// 3. If the path already starts with `/content/` → return it as-is
/// 4. Otherwise → None
///
/// Examples:
/// - /editor.html/content/acme/en/home.html → /content/acme/en/home.html
/// - /content/acme/en/home.html → /content/acme/en/home.html
/// - /editor.html → None
pub fn extract_content_path(url: &Url) -> Option<String> {
    let path = url.path();

    if url.query().is_some_and(|q| q.contains("wcmmode=disabled")) {
        return Some(path.to_string());
    }

    if let Some(captures) = CHROME_PREFIXED.captures(path) {
        return captures.get(1).map(|m| m.as_str().to_string());
    }

    if path.starts_with("/content/") {
        return Some(path.to_string());
    }

    None
}

/// Same as [`extract_content_path`] for an unparsed URL string
pub fn extract_content_path_str(url: &str) -> Option<String> {
    Url::parse(url).ok().and_then(|url| extract_content_path(&url))
}

/// Everything before the first `.html`
pub fn strip_html_suffix(path: &str) -> &str {
    path.split(".html").next().unwrap_or(path)
}

/// Drop a leading `/editor.html` so only the page path remains
pub fn strip_editor_chrome(path: &str) -> &str {
    path.strip_prefix(EDITOR_CHROME).unwrap_or(path)
}

/// Content path with its final `/segment` removed
pub fn parent_path(content_path: &str) -> &str {
    content_path
        .rfind('/')
        .map_or("", |idx| &content_path[..idx])
}

/// Parent path relative to `/content/`, used to rebuild paths under other roots
pub fn project_path(parent: &str) -> &str {
    parent.strip_prefix("/content/").unwrap_or(parent)
}

/// Whether the path lives in one of the forms subtrees
pub fn is_forms_path(path: &str) -> bool {
    FORMS_ROOTS.iter().any(|root| path.starts_with(root))
}

/// Insert a `forms` segment after the third path segment
///
/// - /content/forms/af/acme/intake → /content/forms/af/forms/acme/intake
///
/// Paths with three segments or fewer get `forms` appended.
pub fn insert_forms_segment(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let at = segments.len().min(3);
    segments.insert(at, "forms");
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> Option<String> {
        extract_content_path_str(url)
    }

    #[test]
    fn test_extract_chrome_prefixed() {
        for chrome in [
            "editor",
            "sites",
            "siteadmin",
            "damadmin",
            "assets",
            "aem/experience-fragments",
            "aem/forms",
        ] {
            let url = format!("https://author.example.com/{}.html/content/acme/en/home", chrome);
            assert_eq!(extract(&url), Some("/content/acme/en/home".to_string()), "{}", chrome);
        }
    }

    #[test]
    fn test_extract_keeps_html_suffix() {
        assert_eq!(
            extract("https://author.example.com/editor.html/content/acme/en/home.html"),
            Some("/content/acme/en/home.html".to_string())
        );
    }

    #[test]
    fn test_extract_bare_content_is_identity() {
        assert_eq!(
            extract("https://author.example.com/content/acme/en/home.html"),
            Some("/content/acme/en/home.html".to_string())
        );
        assert_eq!(
            extract("https://author.example.com/content/dam/acme/logo.png"),
            Some("/content/dam/acme/logo.png".to_string())
        );
    }

    #[test]
    fn test_extract_published_marker_wins() {
        assert_eq!(
            extract("https://author.example.com/editor.html/content/acme/en/home.html?wcmmode=disabled"),
            Some("/editor.html/content/acme/en/home.html".to_string())
        );
        assert_eq!(
            extract("https://author.example.com/foo/bar?a=1&wcmmode=disabled"),
            Some("/foo/bar".to_string())
        );
    }

    #[test]
    fn test_extract_not_found() {
        assert_eq!(extract("https://author.example.com/foo/bar"), None);
        assert_eq!(extract("https://author.example.com/editor.html"), None);
        assert_eq!(extract("https://author.example.com/sites.html"), None);
        assert_eq!(extract("https://author.example.com/unknown.html/content/acme"), None);
        assert_eq!(extract("not a url"), None);
    }

    #[test]
    fn test_strip_html_suffix() {
        assert_eq!(strip_html_suffix("/content/acme/en/home.html"), "/content/acme/en/home");
        assert_eq!(strip_html_suffix("/content/acme/en/home"), "/content/acme/en/home");
        assert_eq!(strip_html_suffix("/editor.html/content/a.html"), "/editor");
    }

    #[test]
    fn test_strip_editor_chrome() {
        assert_eq!(strip_editor_chrome("/editor.html/content/acme/en"), "/content/acme/en");
        assert_eq!(strip_editor_chrome("/content/acme/en"), "/content/acme/en");
        assert_eq!(strip_editor_chrome("/sites.html/content/acme"), "/sites.html/content/acme");
    }

    #[test]
    fn test_parent_and_project_path() {
        let parent = parent_path("/content/acme/en/home");
        assert_eq!(parent, "/content/acme/en");
        assert_eq!(project_path(parent), "acme/en");
        assert_eq!(parent_path("home"), "");
        assert_eq!(project_path("/other/acme"), "/other/acme");
    }

    #[test]
    fn test_is_forms_path() {
        assert!(is_forms_path("/content/forms/af/acme/intake"));
        assert!(is_forms_path("/content/dam/formsanddocuments/acme/intake"));
        assert!(!is_forms_path("/content/acme/en/forms"));
        assert!(!is_forms_path("/content/forms/acme"));
    }

    #[test]
    fn test_insert_forms_segment() {
        assert_eq!(
            insert_forms_segment("/content/forms/af/acme/intake"),
            "/content/forms/af/forms/acme/intake"
        );
        assert_eq!(insert_forms_segment("/content/forms"), "/content/forms/forms");
    }
}
