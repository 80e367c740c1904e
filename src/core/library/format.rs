//! core/library/format.rs
//! Whitespace normalisation and serialisation for the library database.

use std::io::Write;

use xmltree::{Element, EmitterConfig, XMLNode};

use super::super::error::Result;

const INDENT: &str = "  ";

/// Rhythmbox writes this exact declaration; keep it so diffs stay small.
const DECLARATION: &str = "<?xml version=\"1.0\" standalone=\"yes\"?>\n";

/// Re-indent `element` in place, two spaces per level.
///
/// - Elements with child nodes: every child goes on its own line, closing tag
///   on its own line at the element's indent. Old whitespace-only text is dropped.
/// - Leaf elements keep their text as-is.
/// - Mixed content (real text beside child elements) is not touched, only
///   recursed into.
pub(super) fn reformat(element: &mut Element, level: usize) {
    let has_nodes = element
        .children
        .iter()
        .any(|n| !matches!(n, XMLNode::Text(_) | XMLNode::CData(_)));
    if !has_nodes {
        return;
    }

    let mixed = element.children.iter().any(|n| match n {
        XMLNode::Text(t) => !t.trim().is_empty(),
        XMLNode::CData(_) => true,
        _ => false,
    });
    if mixed {
        for node in &mut element.children {
            if let XMLNode::Element(child) = node {
                reformat(child, level + 1);
            }
        }
        return;
    }

    let inner = format!("\n{}", INDENT.repeat(level + 1));
    let outer = format!("\n{}", INDENT.repeat(level));

    let old = std::mem::take(&mut element.children);
    let mut children = Vec::with_capacity(old.len() * 2 + 1);
    for mut node in old {
        if matches!(node, XMLNode::Text(_)) {
            continue; // whitespace only, checked above
        }
        if let XMLNode::Element(child) = &mut node {
            reformat(child, level + 1);
        }
        children.push(XMLNode::Text(inner.clone()));
        children.push(node);
    }
    children.push(XMLNode::Text(outer));

    element.children = children;
}

/// Declaration, then the root element. Empty elements are written as
/// `<a></a>`, never `<a/>`.
pub(super) fn write_document<W: Write>(root: &Element, mut writer: W) -> Result<()> {
    writer.write_all(DECLARATION.as_bytes())?;

    let config = EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(false)
        .normalize_empty_elements(false);
    root.write_with_config(&mut writer, config)?;

    writer.write_all(b"\n")?;
    Ok(())
}
