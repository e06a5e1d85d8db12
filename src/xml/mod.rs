//! Owned XML element tree.
//!
//! A small mutable tree used by the structural rewriter: parse with
//! [`Document::parse`], mutate elements in place (rename, delete subtrees,
//! strip namespace prefixes), serialize with [`Document::to_xml`].
//!
//! Names are kept exactly as written (`w:p`, `text:span`) until a namespace
//! prefix is stripped, after which matching uses the bare local name.
//! Comments, processing instructions and the DOCTYPE are dropped on parse.

mod parse;
mod serialize;

pub use parse::parse;

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// A parsed document: one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Parse XML bytes into a tree.
    pub fn parse(bytes: &[u8]) -> crate::Result<Self> {
        parse(bytes)
    }

    /// Serialize the tree back to markup (without an XML declaration).
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        serialize::write_element(&self.root, &mut out);
        out
    }
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder helper: add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder helper: add a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder helper: add a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Attribute value by literal name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace this element with a bare `name` element holding the same
    /// children. Attributes are not carried over.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.attributes.clear();
    }

    /// Concatenated text of this element and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// Direct child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First descendant (document order, excluding `self`) named `name`.
    #[must_use]
    pub fn find_first(&self, name: &str) -> Option<&Element> {
        self.child_elements()
            .find_map(|child| if child.name == name { Some(child) } else { child.find_first(name) })
    }

    /// Mutable variant of [`Element::find_first`].
    pub fn find_first_mut(&mut self, name: &str) -> Option<&mut Element> {
        for node in &mut self.children {
            if let Node::Element(child) = node {
                if child.name == name {
                    return Some(child);
                }
                if let Some(found) = child.find_first_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Whether any descendant satisfies `pred`.
    pub fn any_descendant(&self, pred: &impl Fn(&Element) -> bool) -> bool {
        self.child_elements()
            .any(|child| pred(child) || child.any_descendant(pred))
    }

    /// Delete every descendant subtree whose root satisfies `pred`.
    ///
    /// Returns the number of subtrees removed.
    pub fn remove_descendants(&mut self, pred: &impl Fn(&Element) -> bool) -> usize {
        let before = self.children.len();
        self.children.retain(|node| match node {
            Node::Element(el) => !pred(el),
            Node::Text(_) => true,
        });
        let mut removed = before - self.children.len();
        for node in &mut self.children {
            if let Node::Element(child) = node {
                removed += child.remove_descendants(pred);
            }
        }
        removed
    }

    /// Visit every descendant element in document order.
    ///
    /// `visit` receives the element and the names of its ancestors, outermost
    /// first and including `self`. An element is visited before its children,
    /// so a rename performed by `visit` is seen by the children's paths.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Element, &[String])) {
        let mut path = vec![self.name.clone()];
        walk_children(self, &mut path, visit);
    }

    /// Drop a namespace prefix from this subtree.
    ///
    /// Removes `xmlns:{prefix}` declarations wherever an element carries one
    /// directly, and strips `{prefix}:` from element and attribute names so
    /// later lookups can use bare names.
    pub fn strip_namespace(&mut self, prefix: &str) {
        let declaration = format!("xmlns:{prefix}");
        let qualified = format!("{prefix}:");

        self.attributes.retain(|(key, _)| *key != declaration);
        if let Some(local) = self.name.strip_prefix(&qualified) {
            self.name = local.to_string();
        }
        for (key, _) in &mut self.attributes {
            if let Some(local) = key.strip_prefix(&qualified) {
                *key = local.to_string();
            }
        }
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.strip_namespace(prefix);
            }
        }
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for node in &el.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

fn walk_children(
    el: &mut Element,
    path: &mut Vec<String>,
    visit: &mut impl FnMut(&mut Element, &[String]),
) {
    for node in &mut el.children {
        if let Node::Element(child) = node {
            visit(child, path);
            path.push(child.name.clone());
            walk_children(child, path, visit);
            path.pop();
        }
    }
}
