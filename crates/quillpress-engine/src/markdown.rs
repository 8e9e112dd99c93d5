//! Markdown rendering, delegated to pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Renders markdown source to HTML markup.
///
/// Total: any input renders to some markup, so callers have no failure path
/// to handle here.
pub fn render(src: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(src, options);
    let mut out = String::with_capacity(src.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_paragraph() {
        assert_eq!(render("hello"), "<p>hello</p>\n");
    }

    #[test]
    fn renders_emphasis() {
        assert_eq!(render("*hello*"), "<p><em>hello</em></p>\n");
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }
}
