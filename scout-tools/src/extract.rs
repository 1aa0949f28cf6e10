use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

const SKIPPED: &[&str] = &[
    "head", "script", "style", "noscript", "nav", "header", "footer", "svg", "template",
    "iframe",
];

const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "tr", "td", "th", "ul",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub text: String,
}

/// Pulls the title and the visible text out of an HTML document.
///
/// Chrome (navigation, headers, footers) and non-text elements are dropped,
/// block-level elements end up on their own lines.
pub fn extract_page_text(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = Selector::parse("title").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|el| collapse(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    });

    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    let text = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    ExtractedPage { title, text }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let piece = collapse(text);
                let separated = !out.is_empty() && !out.ends_with(char::is_whitespace);
                if piece.is_empty() {
                    if separated {
                        out.push(' ');
                    }
                    continue;
                }
                if separated && text.starts_with(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(&piece);
                if text.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCKS.contains(&name);
                if block {
                    out.push('\n');
                }
                collect_text(child_element, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_squashes_runs_of_whitespace() {
        assert_eq!(collapse("  a \n\t b  "), "a b");
        assert_eq!(collapse(" \n "), "");
    }

    #[test]
    fn inline_elements_stay_on_one_line() {
        let page = extract_page_text("<p>Founded in <b>2001</b> by <a href='#'>Jane</a>.</p>");
        assert_eq!(page.text, "Founded in 2001 by Jane.");
    }
}
