//! HTML-to-text normalization for lyrics containers.
//!
//! Lyrics pages wrap the actual text in markup that varies per site. The
//! extractor flattens a previously-located container element into plain text
//! where every newline corresponds to an explicit line-break marker in the
//! source, never to implicit wrapping.

use scraper::node::Element;
use scraper::{ElementRef, Node};

/// Sub-elements removed from the container before extraction, matched by tag
/// name or CSS class. Removed subtrees contribute no text at all. Which
/// elements to remove is per-site configuration: ad-break markers, "did you
/// mean" banners and inline scripts have no place in lyrics output.
#[derive(Debug, Clone, Default)]
pub struct StripRules {
    tags: Vec<&'static str>,
    classes: Vec<&'static str>,
}

impl StripRules {
    pub fn new(tags: &[&'static str], classes: &[&'static str]) -> Self {
        StripRules {
            tags: tags.to_vec(),
            classes: classes.to_vec(),
        }
    }

    fn matches(&self, element: &Element) -> bool {
        if self.tags.iter().any(|tag| element.name() == *tag) {
            return true;
        }
        element
            .classes()
            .any(|class| self.classes.iter().any(|c| *c == class))
    }
}

/// Flattens a lyrics container into plain text.
///
/// Direct children are visited in document order: a `<br>` becomes a newline,
/// any other element contributes its concatenated descendant text, and text
/// nodes are emitted verbatim (internal whitespace included). No separators
/// are added beyond that. Pure function: identical input always yields an
/// identical string, and an empty result is not an error.
pub fn extract_text(container: ElementRef<'_>, strip: &StripRules) -> String {
    let mut out = String::new();
    for child in container.children() {
        match child.value() {
            Node::Element(element) if strip.matches(element) => {}
            Node::Element(element) if element.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(element_ref) = ElementRef::wrap(child) {
                    flatten_into(element_ref, strip, &mut out);
                }
            }
            Node::Text(text) => out.push_str(text),
            _ => {}
        }
    }
    out
}

fn flatten_into(element: ElementRef<'_>, strip: &StripRules, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Element(inner) if strip.matches(inner) => {}
            Node::Element(_) => {
                if let Some(element_ref) = ElementRef::wrap(child) {
                    flatten_into(element_ref, strip, out);
                }
            }
            Node::Text(text) => out.push_str(text),
            _ => {}
        }
    }
}
