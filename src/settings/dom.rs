//! In-memory element tree the settings panel renders into.
//! Nodes live in an arena and are addressed by `NodeId`; element ids are
//! indexed so `get_element_by_id` is a map lookup. Event handlers are plain
//! values (`Handler`) that the panel dispatches, so no closure has to
//! capture the panel itself.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOCUMENT: AtomicU64 = AtomicU64::new(1);

/// Handle to a node of one particular `Document`. Handles from another
/// document never resolve through the `try_*` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    document: u64,
    index: usize,
}

/// Actions bound to element events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Tab button click
    ActivateTab(String),
    /// Subsection selector change for the named tab
    ActivateSubsection(String),
}

/// The `display` style of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Unset,
    Block,
    None,
}

/// What a control reports as its `type`; mirrors `HTMLInputElement.type`
/// plus `select-one` for drop-downs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    Checkbox,
    Radio,
    Number,
    Color,
    SelectOne,
}

const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    pub class_name: String,
    /// innerText for elements, content for text nodes
    pub text: String,
    pub input_type: Option<String>,
    pub name: Option<String>,
    pub value: String,
    pub checked: bool,
    pub selected: bool,
    pub display: Display,
    pub on_click: Option<Handler>,
    pub on_change: Option<Handler>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    id: u64,
    nodes: Vec<Element>,
    ids: HashMap<String, NodeId>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        let id = NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            nodes: vec![body],
            ids: HashMap::new(),
            body: NodeId { document: id, index: 0 },
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Element {
            tag: tag.to_string(),
            ..Element::default()
        })
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(Element {
            tag: TEXT_TAG.to_string(),
            text: text.to_string(),
            ..Element::default()
        })
    }

    fn push(&mut self, element: Element) -> NodeId {
        self.nodes.push(element);
        NodeId {
            document: self.id,
            index: self.nodes.len() - 1,
        }
    }

    /// Creates `<tag id="id">` under `parent`, the way a host page declares
    /// elements up front.
    pub fn append_new(&mut self, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_id(node, id);
        }
        self.append_child(parent, node);
        node
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.index].parent.take() {
            self.nodes[old_parent.index].children.retain(|c| *c != child);
        }
        self.nodes[child.index].parent = Some(parent);
        self.nodes[parent.index].children.push(child);
    }

    /// Sets the element id. The first element registered under an id keeps it
    /// for lookups, like `getElementById` returning the first match.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(old) = self.nodes[node.index].id.take() {
            if self.ids.get(&old) == Some(&node) {
                self.ids.remove(&old);
            }
        }
        self.nodes[node.index].id = Some(id.to_string());
        self.ids.entry(id.to_string()).or_insert(node);
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Whether `node` belongs to this document.
    pub fn contains(&self, node: NodeId) -> bool {
        node.document == self.id && node.index < self.nodes.len()
    }

    pub fn try_element(&self, node: NodeId) -> Option<&Element> {
        if node.document != self.id {
            return None;
        }
        self.nodes.get(node.index)
    }

    pub fn try_element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        if node.document != self.id {
            return None;
        }
        self.nodes.get_mut(node.index)
    }

    /// Panics if `node` is not from this document; see `try_element`.
    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.index]
    }

    pub fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.index]
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index].children
    }

    /// Detaches every child of `node`; ids inside the removed subtrees stop resolving.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.index].children);
        for child in children {
            self.nodes[child.index].parent = None;
            self.unregister_ids(child);
        }
    }

    fn unregister_ids(&mut self, node: NodeId) {
        if let Some(id) = self.nodes[node.index].id.clone() {
            if self.ids.get(&id) == Some(&node) {
                self.ids.remove(&id);
            }
        }
        for child in self.nodes[node.index].children.clone() {
            self.unregister_ids(child);
        }
    }

    pub fn control_type(&self, node: NodeId) -> Option<ControlType> {
        let element = self.element(node);
        match (element.tag.as_str(), element.input_type.as_deref()) {
            ("select", _) => Some(ControlType::SelectOne),
            ("input", Some("checkbox")) => Some(ControlType::Checkbox),
            ("input", Some("radio")) => Some(ControlType::Radio),
            ("input", Some("number")) => Some(ControlType::Number),
            ("input", Some("color")) => Some(ControlType::Color),
            _ => None,
        }
    }

    /// A drop-down's value: the selected option's value, else the first option's.
    pub fn select_value(&self, select: NodeId) -> String {
        let options: Vec<NodeId> = self
            .children(select)
            .iter()
            .copied()
            .filter(|c| self.element(*c).tag == "option")
            .collect();
        options
            .iter()
            .find(|o| self.element(**o).selected)
            .or(options.first())
            .map(|o| self.element(*o).value.clone())
            .unwrap_or_default()
    }

    /// Selects the option with `value`; returns false if there is none.
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> bool {
        if !self.contains(select) {
            return false;
        }
        let options = self.children(select).to_vec();
        let mut found = false;
        for option in options {
            let element = self.element_mut(option);
            element.selected = !found && element.value == value;
            found |= element.selected;
        }
        found
    }

    /// Checks a radio button and unchecks the others in its group.
    pub fn check_radio(&mut self, radio: NodeId) {
        let group = self.element(radio).name.clone();
        if let Some(group) = group {
            for element in self.nodes.iter_mut() {
                if element.input_type.as_deref() == Some("radio") && element.name.as_ref() == Some(&group) {
                    element.checked = false;
                }
            }
        }
        self.element_mut(radio).checked = true;
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = self.element(node).text.clone();
        for child in self.children(node) {
            text.push_str(&self.text_content(*child));
        }
        text
    }

    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let element = self.element(node);
        if element.is_text() {
            out.push_str(&escape_html(&element.text));
            return;
        }

        let _ = write!(out, "<{}", element.tag);
        if let Some(id) = &element.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !element.class_name.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&element.class_name));
        }
        if let Some(input_type) = &element.input_type {
            let _ = write!(out, " type=\"{}\"", escape_html(input_type));
        }
        if let Some(name) = &element.name {
            let _ = write!(out, " name=\"{}\"", escape_html(name));
        }
        if !element.value.is_empty() || element.tag == "option" {
            let _ = write!(out, " value=\"{}\"", escape_html(&element.value));
        }
        if element.checked {
            out.push_str(" checked");
        }
        if element.selected {
            out.push_str(" selected");
        }
        match element.display {
            Display::Unset => {}
            Display::Block => out.push_str(" style=\"display:block;\""),
            Display::None => out.push_str(" style=\"display:none;\""),
        }
        out.push('>');

        if is_void(&element.tag) {
            return;
        }
        out.push_str(&escape_html(&element.text));
        for child in &element.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "input")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.append_new(body, "div", Some("panel"));
        let second = doc.append_new(body, "div", Some("panel"));
        assert_eq!(doc.get_element_by_id("panel"), Some(first));

        doc.set_id(first, "other");
        assert_eq!(doc.get_element_by_id("other"), Some(first));
        assert_eq!(doc.get_element_by_id("panel"), None);
        assert_ne!(first, second);
    }

    #[test]
    fn test_clear_children_unregisters_ids() {
        let mut doc = Document::new();
        let body = doc.body();
        let panel = doc.append_new(body, "div", Some("panel"));
        let inner = doc.append_new(panel, "div", None);
        doc.append_new(inner, "input", Some("deep"));

        doc.clear_children(panel);
        assert!(doc.children(panel).is_empty());
        assert_eq!(doc.get_element_by_id("deep"), None);
        assert_eq!(doc.get_element_by_id("panel"), Some(panel));
    }

    #[test]
    fn test_select_value() {
        let mut doc = Document::new();
        let select = doc.append_new(doc.body(), "select", Some("s"));
        for value in ["a", "b"] {
            let option = doc.append_new(select, "option", None);
            doc.element_mut(option).value = value.to_string();
        }
        assert_eq!(doc.select_value(select), "a");
        assert!(doc.set_select_value(select, "b"));
        assert_eq!(doc.select_value(select), "b");
        assert!(!doc.set_select_value(select, "zzz"));
        assert_eq!(doc.control_type(select), Some(ControlType::SelectOne));
    }

    #[test]
    fn test_check_radio_is_exclusive() {
        let mut doc = Document::new();
        let body = doc.body();
        let mut radios = Vec::new();
        for i in 1..=2 {
            let radio = doc.append_new(body, "input", Some(&format!("r{i}")));
            let element = doc.element_mut(radio);
            element.input_type = Some("radio".to_string());
            element.name = Some("group".to_string());
            radios.push(radio);
        }
        doc.check_radio(radios[0]);
        doc.check_radio(radios[1]);
        assert!(!doc.element(radios[0]).checked);
        assert!(doc.element(radios[1]).checked);
    }

    #[test]
    fn test_nodes_of_another_document_do_not_resolve() {
        let mut first = Document::new();
        let body = first.body();
        let panel = first.append_new(body, "div", Some("panel"));

        let mut second = Document::new();
        assert!(first.contains(panel));
        assert!(!second.contains(panel));
        assert!(second.try_element(panel).is_none());
        assert!(second.try_element_mut(panel).is_none());
        assert!(second.try_element(second.body()).is_some());
        assert!(!second.set_select_value(panel, "a"));
    }

    #[test]
    fn test_to_html() {
        let mut doc = Document::new();
        let label = doc.append_new(doc.body(), "label", None);
        let text = doc.create_text_node("Size <px>: ");
        doc.append_child(label, text);
        let input = doc.append_new(label, "input", Some("a_b_size"));
        doc.element_mut(input).input_type = Some("number".to_string());
        doc.element_mut(input).value = "12".to_string();

        assert_eq!(
            doc.to_html(label),
            r#"<label>Size &lt;px&gt;: <input id="a_b_size" type="number" value="12"></label>"#
        );
        assert_eq!(doc.text_content(label), "Size <px>: ");
    }
}
