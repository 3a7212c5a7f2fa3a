//! Settings panel for tree views.
//! A view hands in a declarative `OptionsRegistry` (tabs > subsections > option
//! groups > options); `SettingsPanel` renders it into a `Document`, switches
//! tabs, and reads the controls back into a flat `Settings` map keyed by
//! full option name (`<category>_<subcategory>_<optionName>`).

pub mod dom;
pub mod fan_chart;
pub mod panel;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use dom::{Document, Handler, NodeId};
pub use panel::{SettingsIssue, SettingsPanel, TabElements, TabMapping};
pub use registry::{Choice, OptionKind, OptionSpec, OptionsGroup, OptionsRegistry, Subheading, Subsection, Tab};

/// Radio choices get ids `<name>_radio1` ..= `<name>_radio10`; change detection
/// does not probe past this.
pub const MAX_RADIO_CHOICES: usize = 10;

/// Flat settings, full option name -> value.
pub type Settings = BTreeMap<String, SettingValue>;

/// A single setting as stored by a view or read back from a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Unset,
}

impl SettingValue {
    /// Compares a stored value with one read from a control. Controls only
    /// produce text, so a numeric default matches its textual form.
    pub fn loosely_eq(&self, other: &SettingValue) -> bool {
        use SettingValue::*;
        match (self, other) {
            (Number(n), Text(t)) | (Text(t), Number(n)) => {
                t.trim().parse::<f64>().is_ok_and(|parsed| parsed == *n)
            }
            (Unset, Text(t)) | (Text(t), Unset) => t.is_empty(),
            _ => self == other,
        }
    }

    /// The value as it would appear in an input's `value` attribute.
    pub fn as_input_value(&self) -> String {
        match self {
            SettingValue::Bool(b) => b.to_string(),
            SettingValue::Number(n) => n.to_string(),
            SettingValue::Text(t) => t.clone(),
            SettingValue::Unset => String::new(),
        }
    }
}

/// Upper-cases the first character, e.g. "colours" -> "Colours".
pub fn upper_case_first_letter(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
