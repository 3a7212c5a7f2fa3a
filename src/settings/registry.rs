//! Options registry: the declarative description of a settings panel.
//! Deserializes from the same JSON shape views use (`tabs`, `optionsGroups`,
//! camelCase keys, `type`-tagged options).

use serde::{Deserialize, Deserializer, Serialize};

use super::SettingValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsRegistry {
    /// Global name of the owning view; the dialog's close control calls
    /// `<viewClassName>.cancelSettings()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_class_name: Option<String>,
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub options_groups: Vec<OptionsGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub hide_select: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub subheadings: Vec<Subheading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subheading {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsGroup {
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub subsection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl OptionsGroup {
    /// `<category>_<subcategory>_<optionName>`, used both as settings key and element id.
    pub fn full_option_name(&self, option: &OptionSpec) -> String {
        format!("{}_{}_{}", self.category, self.subcategory, option.option_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    #[serde(default)]
    pub option_name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub kind: OptionKind,
}

/// The six kinds of option a registry can declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OptionKind {
    Checkbox {
        #[serde(rename = "defaultValue", default)]
        default_value: bool,
    },
    Radio {
        values: Vec<Choice>,
        #[serde(rename = "defaultValue", default, deserialize_with = "deserialize_opt_text")]
        default_value: Option<String>,
    },
    Select {
        values: Vec<Choice>,
        #[serde(rename = "defaultValue", default, deserialize_with = "deserialize_opt_text")]
        default_value: Option<String>,
    },
    Number {
        #[serde(rename = "defaultValue", default, deserialize_with = "deserialize_opt_number")]
        default_value: Option<f64>,
    },
    Color {
        #[serde(rename = "defaultValue", default, deserialize_with = "deserialize_opt_text")]
        default_value: Option<String>,
    },
    /// Layout spacer, not a setting.
    Br,
}

impl OptionKind {
    /// Default as stored in a flat settings map; `None` for spacers.
    pub fn default_setting(&self) -> Option<SettingValue> {
        let text = |v: &Option<String>| v.clone().map_or(SettingValue::Unset, SettingValue::Text);
        match self {
            OptionKind::Checkbox { default_value } => Some(SettingValue::Bool(*default_value)),
            OptionKind::Radio { default_value, .. }
            | OptionKind::Select { default_value, .. }
            | OptionKind::Color { default_value } => Some(text(default_value)),
            OptionKind::Number { default_value } => {
                Some(default_value.map_or(SettingValue::Unset, SettingValue::Number))
            }
            OptionKind::Br => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, OptionKind::Br)
    }
}

/// One entry of a radio group or drop-down. A radio value of `"br"` is a line break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(deserialize_with = "deserialize_text")]
    pub value: String,
    #[serde(default)]
    pub text: String,
}

impl Choice {
    pub const LINE_BREAK: &'static str = "br";

    pub fn is_line_break(&self) -> bool {
        self.value == Self::LINE_BREAK
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Registries are hand-written; values like `5` and `"5"` mean the same thing.
fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

fn deserialize_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

fn deserialize_opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Number(n)) => Some(n),
        Some(Scalar::Text(s)) => s.trim().parse().ok(),
        Some(Scalar::Bool(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_option_kinds() {
        let group: OptionsGroup = serde_json::from_value(json!({
            "category": "general",
            "subcategory": "options",
            "tab": "general",
            "subsection": "general",
            "options": [
                { "optionName": "showTitle", "type": "checkbox", "label": "Show title", "defaultValue": true },
                { "optionName": "break", "type": "br" },
                { "optionName": "size", "type": "number", "label": "Size", "defaultValue": "12" },
                { "optionName": "bg", "type": "color", "label": "Background" },
                { "optionName": "mode", "type": "select", "label": "Mode",
                  "values": [ { "value": 5, "text": "Five" } ], "defaultValue": 5 },
                { "optionName": "style", "type": "radio", "label": "Style",
                  "values": [ { "value": "a", "text": "A" }, { "value": "br" } ], "defaultValue": "a",
                  "comment": "pick one" }
            ]
        }))
        .unwrap();

        let kinds: Vec<&OptionKind> = group.options.iter().map(|o| &o.kind).collect();
        assert_eq!(kinds[0], &OptionKind::Checkbox { default_value: true });
        assert!(kinds[1].is_spacer());
        assert_eq!(kinds[2], &OptionKind::Number { default_value: Some(12.0) });
        assert_eq!(kinds[3], &OptionKind::Color { default_value: None });
        match kinds[4] {
            OptionKind::Select { values, default_value } => {
                assert_eq!(values[0].value, "5");
                assert_eq!(default_value.as_deref(), Some("5"));
            }
            other => panic!("expected select, got {other:?}"),
        }
        match kinds[5] {
            OptionKind::Radio { values, .. } => assert!(values[1].is_line_break()),
            other => panic!("expected radio, got {other:?}"),
        }
        assert_eq!(group.options[5].comment.as_deref(), Some("pick one"));
        assert_eq!(group.full_option_name(&group.options[0]), "general_options_showTitle");
    }

    #[test]
    fn test_unknown_option_type_is_rejected() {
        let result: Result<OptionSpec, _> =
            serde_json::from_value(json!({ "optionName": "x", "type": "slider", "label": "X" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(
            OptionKind::Checkbox { default_value: false }.default_setting(),
            Some(SettingValue::Bool(false))
        );
        assert_eq!(OptionKind::Number { default_value: None }.default_setting(), Some(SettingValue::Unset));
        assert_eq!(OptionKind::Br.default_setting(), None);
    }

    #[test]
    fn test_tab_defaults() {
        let tab: Tab = serde_json::from_value(json!({ "name": "general", "label": "General" })).unwrap();
        assert!(tab.subsections.is_empty());
        assert!(!tab.hide_select);
        assert!(tab.comment.is_none());
    }
}
