//! Declarative scene description
//!
//! A renderer-independent view tree: elements carry a tag, string props and
//! children; text nodes carry literal text. Tags starting with an uppercase
//! letter name UI components (popover, overlay trigger, button) that a
//! rendering surface maps onto its own primitives.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text { text: String },
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements in the tree, pre-order, starting with this node
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_elements(&mut out);
        out
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            out.push(element);
            for child in &element.children {
                child.collect_elements(out);
            }
        }
    }

    /// Elements carrying the given class
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|element| element.has_class(class))
            .collect()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.prop("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Whether the tag names a UI component rather than a plain element
    pub fn is_component(&self) -> bool {
        self.tag.chars().next().is_some_and(char::is_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_queries() {
        let node: Node = Element::new("div")
            .class("row variant-row")
            .child(Element::new("a").prop("href", "/task/t1").text("t1"))
            .text(" - ")
            .into();

        let element = node.as_element().unwrap();
        assert!(element.has_class("variant-row"));
        assert!(!element.has_class("variant"));
        assert_eq!(node.text_content(), "t1 - ");
        assert_eq!(node.elements().len(), 2);
        assert_eq!(node.elements()[1].get("href"), Some("/task/t1"));
    }

    #[test]
    fn test_component_tags() {
        assert!(Element::new("Popover").is_component());
        assert!(!Element::new("div").is_component());
    }

    #[test]
    fn test_serialize_shape() {
        let node: Node = Element::new("span").class("x").text("hi").into();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tag": "span",
                "props": {"class": "x"},
                "children": [{"text": "hi"}]
            })
        );

        let bare: Node = Element::new("br").into();
        assert_eq!(serde_json::to_value(&bare).unwrap(), serde_json::json!({"tag": "br"}));
    }
}
