use xmltree::{Element, XMLNode};

/// Parsed gateway reply.
///
/// Lookups are namespace-qualified with the namespace of the root element, so the same
/// paths work whether a given endpoint declares a default namespace or none at all.
#[derive(Debug, Clone)]
pub struct ResponseDocument {
    root: Element,
}

impl ResponseDocument {
    /// Parse an already-decoded reply body.
    ///
    /// The XML declaration is dropped first: its `encoding` no longer describes the text.
    pub fn parse(text: &str) -> Result<Self, xmltree::ParseError> {
        let root = Element::parse(strip_declaration(text).as_bytes())?;
        Ok(Self { root })
    }

    /// Namespace URI bound to the root element, if any.
    pub fn namespace(&self) -> Option<&str> {
        normalize(self.root.namespace.as_deref())
    }

    /// Number of element children below the root.
    pub fn child_count(&self) -> usize {
        self.root
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .count()
    }

    /// Text of the element at `path`, starting with the root element's own name.
    ///
    /// Returns `None` when any step is missing or the final element has no text
    /// (blank text counts as missing).
    pub fn select_text(&self, path: &[&str]) -> Option<String> {
        let (first, rest) = path.split_first()?;
        let namespace = self.namespace();
        if !matches(&self.root, first, namespace) {
            return None;
        }

        let mut current = &self.root;
        for name in rest {
            current = current
                .children
                .iter()
                .filter_map(XMLNode::as_element)
                .find(|child| matches(child, name, namespace))?;
        }

        let text = current.get_text()?;
        if text.trim().is_empty() {
            return None;
        }
        Some(text.into_owned())
    }
}

fn strip_declaration(text: &str) -> &str {
    let body = text.trim_start_matches('\u{feff}').trim_start();
    if !body.starts_with("<?xml") {
        return text;
    }
    match body.find("?>") {
        Some(end) => &body[end + 2..],
        None => text,
    }
}

fn matches(element: &Element, name: &str, namespace: Option<&str>) -> bool {
    element.name == name && normalize(element.namespace.as_deref()) == namespace
}

fn normalize(namespace: Option<&str>) -> Option<&str> {
    namespace.filter(|ns| !ns.is_empty())
}
