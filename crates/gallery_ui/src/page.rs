//! Retained element tree standing in for the live document.
//!
//! The host mirrors whatever it needs from the real page into a [`Page`]
//! (structure, classes, measured heights, image load state) and reads the
//! mutations back after each dispatched event.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageState {
    pub complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    inner_html: String,
    height: f64,
    image: Option<ImageState>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<Element>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let is_image = tag.eq_ignore_ascii_case("img");
        self.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            image: is_image.then(ImageState::default),
            ..Element::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Detaches `child` from any previous parent and appends it to `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(previous) = self.nodes[child.0].parent.take() {
            self.nodes[previous.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|node| self.nodes[node.0].id.as_deref() == Some(id))
    }

    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    pub fn query_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|node| self.has_class(*node, class))
            .collect()
    }

    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|node| self.has_class(*node, class))
    }

    pub fn first_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|node| self.nodes[node.0].tag.eq_ignore_ascii_case(tag))
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.nodes[candidate.0].parent;
        }
        None
    }

    /// Inclusive.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.nodes[candidate.0].parent;
        }
        false
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.contains(class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.remove(class);
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let classes = &mut self.nodes[node.0].classes;
        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].style.get(property).map(String::as_str)
    }

    /// An empty value clears the property, like assigning `''` in the DOM.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let style = &mut self.nodes[node.0].style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn value(&self, node: NodeId) -> &str {
        &self.nodes[node.0].value
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.nodes[node.0].value = value.to_string();
    }

    pub fn inner_html(&self, node: NodeId) -> &str {
        &self.nodes[node.0].inner_html
    }

    pub fn set_inner_html(&mut self, node: NodeId, html: String) {
        self.nodes[node.0].inner_html = html;
    }

    pub fn height(&self, node: NodeId) -> f64 {
        self.nodes[node.0].height
    }

    pub fn set_height(&mut self, node: NodeId, height: f64) {
        self.nodes[node.0].height = height;
    }

    pub fn image_state(&self, node: NodeId) -> Option<ImageState> {
        self.nodes[node.0].image
    }

    pub fn set_image_state(&mut self, node: NodeId, state: ImageState) {
        self.nodes[node.0].image = Some(state);
    }
}

/// Fluent helper for assembling fixture pages.
pub struct ElementBuilder<'a> {
    page: &'a mut Page,
    node: NodeId,
}

impl<'a> ElementBuilder<'a> {
    pub fn new(page: &'a mut Page, parent: NodeId, tag: &str) -> Self {
        let node = page.create_element(tag);
        page.append_child(parent, node);
        Self { page, node }
    }

    pub fn id(self, id: &str) -> Self {
        self.page.set_id(self.node, id);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.page.add_class(self.node, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.page.set_attr(self.node, name, value);
        self
    }

    pub fn style(self, property: &str, value: &str) -> Self {
        self.page.set_style(self.node, property, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.page.set_text(self.node, text);
        self
    }

    pub fn height(self, height: f64) -> Self {
        self.page.set_height(self.node, height);
        self
    }

    pub fn loaded(self) -> Self {
        self.page
            .set_image_state(self.node, ImageState { complete: true });
        self
    }

    pub fn build(self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
