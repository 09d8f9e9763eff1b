use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::node::Node;
use scraper::Html;
use url::Url;

/// Placeholder link target for anything that is not known to be safe.
pub const SAFE_URL: &str = "#";

lazy_static! {
    static ref WEB_URL: Regex = Regex::new(r"(?i)^https?://[^\s/$.?#].[^\s]*$").unwrap();
    static ref MAILTO_URL: Regex = Regex::new(r"(?i)^mailto:[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Escapes the five HTML-special characters so text can sit inside element
/// content or a quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Reduces rich text to its visible text: tags removed, entities decoded,
/// `<script>`/`<style>` content dropped and whitespace runs collapsed.
pub fn strip_html(input: &str) -> String {
    if !input.contains('<') && !input.contains('&') {
        return collapse_whitespace(input);
    }

    let fragment = Html::parse_fragment(input);
    let mut text = String::with_capacity(input.len());
    for node in fragment.tree.root().descendants() {
        if let Node::Text(chunk) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                matches!(ancestor.value(), Node::Element(el) if matches!(el.name(), "script" | "style"))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
    }
    collapse_whitespace(&text)
}

/// Cuts `text` to at most `max_chars` characters and appends "..." when anything was cut.
pub fn truncate_text(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}...", text[..cut].trim_end())),
    }
}

/// Returns the trimmed URL when it is an absolute http(s) URL, a `mailto:`
/// address, a root-relative path or a fragment. Everything else becomes [`SAFE_URL`].
///
/// Protocol-relative URLs (`//host/...`) are not root-relative and are rejected.
pub fn sanitize_url(url: &str) -> &str {
    let trimmed = url.trim();
    if is_web_url(trimmed)
        || MAILTO_URL.is_match(trimmed)
        || is_root_relative(trimmed)
        || trimmed.starts_with('#')
    {
        trimmed
    } else {
        SAFE_URL
    }
}

fn is_web_url(candidate: &str) -> bool {
    WEB_URL.is_match(candidate)
        && Url::parse(candidate)
            .map(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()))
            .unwrap_or(false)
}

fn is_root_relative(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Bob" & co</b>"#),
            "&lt;b&gt;&quot;Bob&quot; &amp; co&lt;/b&gt;"
        );
        assert_eq!(escape_html("it's"), "it&#039;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escape_html_leaves_no_special_characters() {
        let escaped = escape_html(r#"<script>alert('x' + "y")</script> & more"#);
        for ch in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(ch), "found raw {:?} in {}", ch, escaped);
        }
        // Every remaining ampersand starts an entity.
        assert_eq!(escaped.matches('&').count(), escaped.matches(';').count());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("Fish &amp; chips"), "Fish & chips");
        assert_eq!(strip_html("  spaced \n  out "), "spaced out");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_strip_html_drops_script_and_style() {
        assert_eq!(
            strip_html("<style>p { color: red }</style><script>alert(1)</script>Safe text"),
            "Safe text"
        );
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_text("abcdefghijkl", 5), "abcde...");
        assert_eq!(truncate_text("word and more", 5), "word...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        let text = "é".repeat(12);
        assert_eq!(truncate_text(&text, 10), format!("{}...", "é".repeat(10)));
    }

    #[test]
    fn test_sanitize_url_accepts_safe_forms() {
        assert_eq!(sanitize_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(sanitize_url("  http://example.com/a?b=c  "), "http://example.com/a?b=c");
        assert_eq!(sanitize_url("HTTPS://Example.com/"), "HTTPS://Example.com/");
        assert_eq!(sanitize_url("mailto:desk@news.example"), "mailto:desk@news.example");
        assert_eq!(sanitize_url("/foo"), "/foo");
        assert_eq!(sanitize_url("/"), "/");
        assert_eq!(sanitize_url("#section"), "#section");
    }

    #[test]
    fn test_sanitize_url_rejects_everything_else() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "file:///etc/passwd",
            "ftp://example.com/file",
            "https://",
            "https:///path",
            "https://exa mple.com",
            "example.com/a",
            "mailto:nobody",
            "//evil.example/x",
            "/\\evil.example/x",
            "",
            "   ",
        ] {
            assert_eq!(sanitize_url(url), SAFE_URL, "{} should be rejected", url);
        }
    }
}
