//! Helpers over `roxmltree` shared by the markup corpora.
//!
//! Elements are matched by local name so TEI files with and without the
//! TEI namespace read the same way.

use roxmltree::{Document, Node, ParsingOptions};

/// Parse a markup document. DTDs are allowed; a leading XML declaration is
/// dropped because the text has already been decoded.
pub fn parse(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(strip_declaration(text), options)
}

/// Drop a byte-order mark and a leading `<?xml ...?>` declaration.
pub fn strip_declaration(text: &str) -> &str {
    let text = text.trim_start_matches('\u{feff}');
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    text
}

/// Make an html-like file parseable as XML: wrap it in a synthetic root so
/// several top-level elements are allowed, and escape every `&` that does
/// not start a predefined or numeric entity.
pub fn lenient(text: &str) -> String {
    let body = strip_doctype(strip_declaration(text));
    let mut out = String::with_capacity(body.len() + 32);
    out.push_str("<document>");

    let mut rest = body;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if starts_entity(tail) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    out.push_str("</document>");
    out
}

fn strip_doctype(text: &str) -> &str {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("<!DOCTYPE") {
        return text;
    }
    let close = match (trimmed.find('['), trimmed.find('>')) {
        (Some(open), Some(gt)) if open < gt => trimmed.find("]>").map(|end| end + 2),
        (_, Some(gt)) => Some(gt + 1),
        _ => None,
    };
    close.map_or(text, |end| &trimmed[end..])
}

fn starts_entity(tail: &str) -> bool {
    let Some(end) = tail[1..].find(';') else {
        return false;
    };
    let name = &tail[1..=end];
    if let Some(number) = name.strip_prefix('#') {
        return match number.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()),
        };
    }
    matches!(name, "amp" | "lt" | "gt" | "quot" | "apos")
}

/// Is `node` an element with local name `name`?
pub fn is_element(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// First direct child element named `name`.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element(*n, name))
}

/// Every direct child element named `name`.
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_element(*n, name))
}

/// Follow a chain of child element names.
pub fn path<'a, 'input>(node: Node<'a, 'input>, steps: &[&str]) -> Option<Node<'a, 'input>> {
    steps.iter().try_fold(node, |current, step| child(current, step))
}

/// First element named `name` below (or at) `node`, in document order.
pub fn find<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| is_element(*n, name))
}

/// Every element named `name` below (or at) `node`, in document order.
pub fn find_all<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().filter(move |n| is_element(*n, name))
}

/// Remove embedded newlines and tabs, then trim.
pub fn normalize_fragment(fragment: &str) -> String {
    fragment.replace(['\n', '\t'], "").trim().to_string()
}

/// Normalized, non-empty text fragments under `node`.
pub fn fragments<'a, 'input: 'a>(node: Node<'a, 'input>) -> impl Iterator<Item = String> + 'a {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .map(normalize_fragment)
        .filter(|fragment| !fragment.is_empty())
}

/// All text under `node`, fragments normalized and joined by single spaces.
pub fn joined_text(node: Node<'_, '_>) -> String {
    fragments(node).collect::<Vec<_>>().join(" ")
}

/// Text of several nodes, joined the same way as [`joined_text`].
pub fn joined_text_of<'a, 'input: 'a>(nodes: impl Iterator<Item = Node<'a, 'input>>) -> String {
    nodes.flat_map(fragments).collect::<Vec<_>>().join(" ")
}

/// All text under `node`, untouched.
pub fn raw_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// The full text content of `node`, normalized as one fragment.
///
/// Inline elements do not split words: `Lon<hi>don</hi>` reads `London`.
pub fn element_text(node: Node<'_, '_>) -> String {
    normalize_fragment(&raw_text(node))
}

/// [`element_text`] of each node, empty ones dropped, joined by single
/// spaces.
pub fn paragraphs_text<'a, 'input: 'a>(nodes: impl Iterator<Item = Node<'a, 'input>>) -> String {
    nodes
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
