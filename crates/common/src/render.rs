use mime::Mime;
use pulldown_cmark::{html, Options, Parser};

use crate::document::DocumentKind;

/// Injected markdown to HTML conversion
pub type MarkdownFn = fn(&str) -> String;

/// Displayable output for a single document
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub content_type: Mime,
    pub body: String,
}

impl Rendered {
    /// Whether the body is an HTML fragment meant for a page shell
    pub fn is_html(&self) -> bool {
        self.content_type.subtype() == mime::HTML
    }
}

/// Dispatch on document kind: plain text passes through untouched,
///  markdown goes through `markdown`.
pub fn render(kind: DocumentKind, content: &[u8], markdown: MarkdownFn) -> Rendered {
    let text = String::from_utf8_lossy(content);
    match kind {
        DocumentKind::PlainText => Rendered {
            content_type: mime::TEXT_PLAIN,
            body: text.into_owned(),
        },
        DocumentKind::Markdown => Rendered {
            content_type: mime::TEXT_HTML_UTF_8,
            body: markdown(&text),
        },
    }
}

/// Converts markdown content to an HTML fragment
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(text: &str) -> String {
        text.to_uppercase()
    }

    #[test]
    fn test_plain_text_passes_through() {
        let content = "['WED', '9/12/2018'] => *not* markdown";
        let rendered = render(DocumentKind::PlainText, content.as_bytes(), shout);
        assert_eq!(rendered.content_type, mime::TEXT_PLAIN);
        assert_eq!(rendered.body, content);
        assert!(!rendered.is_html());
    }

    #[test]
    fn test_markdown_uses_injected_renderer() {
        let rendered = render(DocumentKind::Markdown, b"hello", shout);
        assert_eq!(rendered.content_type, mime::TEXT_HTML_UTF_8);
        assert_eq!(rendered.body, "HELLO");
        assert!(rendered.is_html());
    }

    #[test]
    fn test_markdown_to_html() {
        assert_eq!(markdown_to_html("File based CMS"), "<p>File based CMS</p>\n");

        let html = markdown_to_html("# Title\n\n![image](1.jpg)");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains(r#"<img src="1.jpg" alt="image" />"#));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let rendered = render(DocumentKind::PlainText, &[0x66, 0xff, 0x6f], shout);
        assert_eq!(rendered.body, "f\u{fffd}o");
    }
}
