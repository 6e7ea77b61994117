//! A small element tree standing in for the browser DOM.
//!
//! The renderer builds `Element`s and swaps them into a `Document` by id;
//! the dispatcher resolves click targets against the same tree. Text nodes
//! are escaped when serialized, `Node::Raw` fragments are emitted verbatim
//! and must be escaped by whoever builds them.

use std::fmt::Write;

/// HTML5 void elements: no children, no closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// Escape `& < > ' "` so the string can sit in text or an attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-escaped markup.
    Raw(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    fn text_content(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.children.iter().for_each(|c| c.text_content(out)),
            Node::Text(t) => out.push_str(t),
            Node::Raw(r) => out.push_str(r),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Raw(r) => out.push_str(r),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    // ----- builder -----

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    // ----- attributes -----

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.has_attr("hidden")
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.set_attr("hidden", "");
        } else {
            self.remove_attr("hidden");
        }
    }

    // ----- classes -----

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // ----- inline style -----

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style_property(&mut self, name: &str, value: &str) {
        match self.style.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.style.push((name.to_string(), value.to_string())),
        }
    }

    // ----- content -----

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| c.text_content(&mut out));
        out
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Replace every child at once.
    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Depth-first search for a descendant (or self) with the given id.
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| match c {
            Node::Element(e) => e.find_mut(id),
            _ => None,
        })
    }

    /// Every descendant element carrying `class`, in document order.
    pub fn select_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.has_class(class) {
                out.push(child);
            }
            child.select_class(class, out);
        }
    }

    /// Elements from self down to the one at `path`, where each step is an
    /// index into the element children of the previous one.
    fn chain(&self, path: &[usize]) -> Option<Vec<&Element>> {
        let mut chain = vec![self];
        let mut current = self;
        for &idx in path {
            current = current.child_elements().nth(idx)?;
            chain.push(current);
        }
        Some(chain)
    }

    // ----- serialization -----

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        // Attribute values are escaped; writes to a String cannot fail
        for (name, value) in &self.attrs {
            if value.is_empty() && name == "hidden" {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
            }
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let decls: Vec<String> = self.style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            let _ = write!(out, " style=\"{}\"", escape_html(&decls.join("; ")));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Where a click landed: an element with an id, then a path of element-child
/// indices below it. An empty path means the element itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    pub id: String,
    pub path: Vec<usize>,
}

impl ClickTarget {
    pub fn element(id: &str) -> Self {
        Self {
            id: id.to_string(),
            path: Vec::new(),
        }
    }

    pub fn within(id: &str, path: &[usize]) -> Self {
        Self {
            id: id.to_string(),
            path: path.to_vec(),
        }
    }
}

/// The page: an `<html>` element whose body holds every bound element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(body: Element) -> Self {
        Self {
            root: Element::new("html").with_child(body),
        }
    }

    /// The `<html>` element: theme attribute and root style properties live here.
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(id)
    }

    /// Nearest element, starting at the target and walking up to (and
    /// including) the element named by the target's id, that satisfies `pred`.
    pub fn closest(&self, target: &ClickTarget, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        let anchor = self.get(&target.id)?;
        let chain = anchor.chain(&target.path)?;
        chain.into_iter().rev().find(|e| pred(e))
    }

    /// Whether the target lies inside the element with id `container`.
    pub fn contains(&self, container: &str, target: &ClickTarget) -> bool {
        if target.id == container {
            return true;
        }
        self.get(container)
            .map(|c| c.find(&target.id).is_some())
            .unwrap_or(false)
    }

    pub fn to_html(&self) -> String {
        format!("<!doctype html>\n{}", self.root.to_html())
    }
}
