//! Declarative form tree handed to the host for rendering.
//!
//! Nothing here renders anything. Elements describe controls, tables,
//! visibility rules and drag-reorder hints; the host turns them into
//! widgets and returns submitted values shaped like
//! [`PatternDisplaySettings`](crate::settings::PatternDisplaySettings).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered (value, label) options of a select control
pub type SelectOptions = IndexMap<String, String>;

/// Named children of a container or form root, in render order
pub type FormTree = IndexMap<String, FormElement>;

/// Condition under which an element is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWhen {
    /// Name of the controlling element (e.g., "pattern")
    pub control: String,
    /// Value the controlling element must hold
    pub equals: String,
}

/// Single-select control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub title: String,
    #[serde(default)]
    pub options: SelectOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Value submitted when nothing is chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Hide the title visually (table cells)
    #[serde(default)]
    pub title_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

/// Integer weight selector for drag-ordered rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<i64>,
    /// Selectable range is `-delta..=delta`
    pub delta: u32,
    /// Tabledrag group this weight belongs to
    pub group: String,
}

/// Grouping element, optionally conditionally visible
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
    #[serde(default)]
    pub children: FormTree,
}

/// Drag-reorder hint for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDrag {
    /// Always "order" for weight-driven tables
    pub action: String,
    pub relationship: String,
    /// Class of the weight elements driving the order
    pub group: String,
}

impl TableDrag {
    /// Sibling ordering driven by the weight elements of `group`
    pub fn order_by(group: impl Into<String>) -> Self {
        Self {
            action: "order".to_string(),
            relationship: "sibling".to_string(),
            group: group.into(),
        }
    }
}

/// One table row, keyed in the parent table by its composite key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells keyed by column machine name, in column order
    pub cells: FormTree,
    #[serde(default)]
    pub draggable: bool,
}

/// Table of form rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: IndexMap<String, TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabledrag: Option<TableDrag>,
}

/// Any element of the form tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormElement {
    /// Plain, escaped text
    PlainText { text: String },
    Select(Select),
    Weight(Weight),
    Container(Container),
    Table(Table),
}

impl FormElement {
    pub fn plain_text(text: impl Into<String>) -> Self {
        FormElement::PlainText { text: text.into() }
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            FormElement::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            FormElement::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            FormElement::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_weight(&self) -> Option<&Weight> {
        match self {
            FormElement::Weight(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_plain_text(&self) -> Option<&str> {
        match self {
            FormElement::PlainText { text } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_serialization_is_tagged() {
        let element = FormElement::Select(Select {
            title: "Pattern".to_string(),
            required: true,
            ..Default::default()
        });
        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains("\"type\":\"select\""));

        let deserialized: FormElement = serde_json::from_str(&json).unwrap();
        assert!(deserialized.as_select().unwrap().required);
    }

    #[test]
    fn test_plain_text_accessor() {
        let cell = FormElement::plain_text("Title");
        assert_eq!(cell.as_plain_text(), Some("Title"));
        assert!(cell.as_table().is_none());
    }
}
