//! Core data structures for ADF input trees.

use super::kind::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single node of an Atlassian Document Format tree.
///
/// `content` order is reading order and is never rearranged by the converter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdfNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<AdfNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
}

/// A formatting mark applied to a text leaf (or a block, for alignment marks).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
}

impl AdfNode {
    /// Creates a bare node of the given type.
    pub fn new(node_type: impl Into<String>) -> Self {
        AdfNode {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Creates a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        AdfNode {
            node_type: "text".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: Vec<AdfNode>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_attrs(mut self, attrs: Value) -> Self {
        if let Value::Object(map) = attrs {
            self.attrs = Some(map);
        }
        self
    }

    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = Some(marks);
        self
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.node_type)
    }

    pub fn children(&self) -> &[AdfNode] {
        self.content.as_deref().unwrap_or(&[])
    }

    pub fn marks(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or(&[])
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(name))
    }

    /// String attribute, ignoring empty strings.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Integer attribute; numeric strings are accepted since ADF producers disagree.
    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        match self.attr(name)? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|value| value as i64)),
            Value::String(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    /// Concatenated text of every text leaf below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(AdfNode::subtree_size)
            .sum::<usize>()
    }
}

fn collect_text(node: &AdfNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Mark {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Value) -> Self {
        if let Value::Object(map) = attrs {
            self.attrs = Some(map);
        }
        self
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .and_then(Value::as_str)
    }

    /// The mark as it appears in ADF JSON.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(self.mark_type.as_str()));
        if let Some(attrs) = &self.attrs {
            map.insert("attrs".to_string(), Value::Object(attrs.clone()));
        }
        Value::Object(map)
    }
}
