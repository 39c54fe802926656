use scraper::{ElementRef, Html, Node};

const MAX_DEPTH: usize = 256;

/// Elements whose text never reaches the reader.
const SKIPPED: [&str; 6] = ["head", "script", "style", "noscript", "svg", "template"];

/// Elements that start and end their own line.
const BLOCK: [&str; 34] = [
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "section", "summary", "table", "tr",
    "ul",
];

/// Renders an HTML document to plain text, one block per line.
///
/// Whitespace inside a block collapses to single spaces, `<br>` breaks the
/// line, and empty lines are dropped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();
    let mut current = String::new();

    walk(document.root_element(), &mut lines, &mut current, 0);
    flush(&mut lines, &mut current);

    lines.join("\n")
}

fn walk(element: ElementRef, lines: &mut Vec<String>, current: &mut String, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }

    for node in element.children() {
        match node.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) => {
                let tag = el.name();
                if SKIPPED.contains(&tag) {
                    continue;
                }
                if tag == "br" {
                    flush(lines, current);
                    continue;
                }
                let Some(child) = ElementRef::wrap(node) else {
                    continue;
                };
                let block = BLOCK.contains(&tag);
                if block {
                    flush(lines, current);
                }
                walk(child, lines, current, depth + 1);
                if block {
                    flush(lines, current);
                }
            }
            _ => {}
        }
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
