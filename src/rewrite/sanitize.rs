//! Tag whitelist applied to serialized markup.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Any start, end or self-closing tag. Group 1: `/` for end tags, group 2:
/// name, group 3: `/` for self-closing tags.
#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z_][A-Za-z0-9_.:\-]*)[^>]*?(/?)>").expect("valid regex")
});

/// Comments, processing instructions and declarations.
#[allow(clippy::expect_used)]
static MARKUP_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<\?.*?\?>|<![^>]*>").expect("valid regex")
});

/// Remove every tag whose name is not in `allowed`, keeping its text.
///
/// Allowed tags are re-emitted bare (attributes dropped) and self-closing
/// allowed tags are expanded to an empty start/end pair. Entity references in
/// the text are left as they are.
///
/// # Example
///
/// ```rust
/// use rs_docparser::rewrite::strip_tags;
///
/// let html = strip_tags(r#"<body><p class="x">a <b>b</b> <em>c</em></p></body>"#, &["p", "em"]);
/// assert_eq!(html, "<p>a b <em>c</em></p>");
/// ```
#[must_use]
pub fn strip_tags(markup: &str, allowed: &[&str]) -> String {
    let markup = MARKUP_DECL_RE.replace_all(markup, "");
    TAG_RE
        .replace_all(&markup, |caps: &Captures| {
            let name = &caps[2];
            if !allowed.contains(&name) {
                return String::new();
            }
            if &caps[1] == "/" {
                format!("</{name}>")
            } else if &caps[3] == "/" {
                format!("<{name}></{name}>")
            } else {
                format!("<{name}>")
            }
        })
        .into_owned()
}
