//! Settings panel builder.
//! Renders an `OptionsRegistry` into tab panels the host page provides
//! (`<tab>-panel` / `<tab>-tab`), keeps the tab -> element bindings, and reads
//! control state back for change detection.
//!
//! Misconfigured registries never fail the build: every missing tab, panel,
//! subsection or subheading is logged, recorded as a `SettingsIssue`, and the
//! affected piece is skipped.

use std::collections::BTreeMap;
use thiserror::Error;

use super::dom::{ControlType, Display, Document, Handler, NodeId};
use super::registry::{OptionKind, OptionSpec, OptionsGroup, OptionsRegistry, Subheading, Subsection, Tab};
use super::{MAX_RADIO_CHOICES, SettingValue, Settings};

/// A registry problem found while building the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsIssue {
    #[error("no tab panel element '{element}' found for tab '{tab}'")]
    MissingTabPanel { tab: String, element: String },
    #[error("no tab button element '{element}' found for tab '{tab}'")]
    MissingTabButton { tab: String, element: String },
    #[error("options group '{category}_{subcategory}' has no tab")]
    GroupWithoutTab { category: String, subcategory: String },
    #[error("options group '{category}_{subcategory}' has no subsection")]
    GroupWithoutSubsection { category: String, subcategory: String },
    #[error("no element found for tab '{tab}'")]
    UnboundTab { tab: String },
    #[error("no subsection '{subsection}' found on tab '{tab}'")]
    UnknownSubsection { tab: String, subsection: String },
    #[error("no subheading '{subheading}' found in '{tab}' / '{subsection}'")]
    UnknownSubheading { tab: String, subsection: String, subheading: String },
    #[error("radio option '{option}' has {count} choices; only the first {max} can be read back", max = MAX_RADIO_CHOICES)]
    TooManyRadioChoices { option: String, count: usize },
}

/// Element ids a tab is expected to have in the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabMapping {
    pub tab: String,
    pub panel_element: String,
    pub button_element: String,
}

/// Live bindings for one built tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabElements {
    pub panel: NodeId,
    pub button: NodeId,
    /// Subsection drop-down
    pub select: Option<NodeId>,
    /// Subsection name -> subsection panel
    pub subsections: BTreeMap<String, NodeId>,
}

#[derive(Debug, Clone)]
pub struct SettingsPanel {
    registry: OptionsRegistry,
    tab_mapping: Vec<TabMapping>,
    tab_elements: BTreeMap<String, TabElements>,
    active_tab: Option<String>,
    last_subsection_selected: Option<String>,
    diagnostics: Vec<SettingsIssue>,
}

impl SettingsPanel {
    pub fn new(registry: OptionsRegistry) -> Self {
        let tab_mapping = create_tab_mapping(&registry);
        Self {
            registry,
            tab_mapping,
            tab_elements: BTreeMap::new(),
            active_tab: None,
            last_subsection_selected: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn registry(&self) -> &OptionsRegistry {
        &self.registry
    }

    pub fn tab_mapping(&self) -> &[TabMapping] {
        &self.tab_mapping
    }

    pub fn tab_elements(&self) -> &BTreeMap<String, TabElements> {
        &self.tab_elements
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Everything skipped by the last `build_page`.
    pub fn diagnostics(&self) -> &[SettingsIssue] {
        &self.diagnostics
    }

    fn record(&mut self, issue: SettingsIssue) {
        tracing::warn!("buildPage: {issue}");
        self.diagnostics.push(issue);
    }

    // *************** Dialog markup ***************

    /// Markup for the whole settings dialog: close control, tab list, panels
    /// and the save button.
    pub fn create_settings_div(&self) -> String {
        let view = self.registry.view_class_name.as_deref().unwrap_or("view");
        format!(
            concat!(
                r#"<div id="settingsDIV" style="display:none; position:absolute; right:20px; "#,
                r#"background-color:aliceblue; border: solid darkgreen 4px; border-radius: 15px; padding: 15px;">"#,
                r#"<span style="color:red; align:left"><a onclick="{view}.cancelSettings();">[ <b><font color=red>x</font></b> ]</a></span>"#,
                "{tabs}",
                r#"<br /><div align="center"><div id="status"></div>"#,
                r#"<button id="saveSettingsChanges" class="saveButton">Save changes (all tabs)</button></div></div>"#
            ),
            view = super::dom::escape_html(view),
            tabs = self.create_ul_elements(),
        )
    }

    /// The tab list plus one empty panel per tab.
    pub fn create_ul_elements(&self) -> String {
        let mut list = String::from("<ul class='profile-tabs'>");
        let mut panels = String::new();
        for (tab, mapping) in self.registry.tabs.iter().zip(&self.tab_mapping) {
            list.push_str(&format!(
                r#"<li id="{}">{}</li>"#,
                mapping.button_element,
                super::dom::escape_html(&tab.label)
            ));
            panels.push_str(&format!(r#"<div id="{}"></div>"#, mapping.panel_element));
        }
        list.push_str("</ul>");
        list + &panels
    }

    /// Creates the dialog structure under `parent` for hosts that do not
    /// declare the tab elements themselves. Returns the dialog node.
    pub fn mount_dialog(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        let dialog = doc.append_new(parent, "div", Some("settingsDIV"));
        let list = doc.append_new(dialog, "ul", None);
        doc.element_mut(list).class_name = "profile-tabs".to_string();

        for (tab, mapping) in self.registry.tabs.iter().zip(&self.tab_mapping) {
            let item = doc.append_new(list, "li", Some(&mapping.button_element));
            doc.element_mut(item).text = tab.label.clone();
        }
        for mapping in &self.tab_mapping {
            doc.append_new(dialog, "div", Some(&mapping.panel_element));
        }

        doc.append_new(dialog, "br", None);
        let footer = doc.append_new(dialog, "div", None);
        doc.append_new(footer, "div", Some("status"));
        let save = doc.append_new(footer, "button", Some("saveSettingsChanges"));
        let save = doc.element_mut(save);
        save.class_name = "saveButton".to_string();
        save.text = "Save changes (all tabs)".to_string();
        dialog
    }

    // *************** Page construction ***************

    /// Binds each tab to its panel/button in `doc` and renders subsections and
    /// options into the panels. Rebuilding replaces whatever a previous build
    /// rendered into those panels.
    pub fn build_page(&mut self, doc: &mut Document) {
        self.diagnostics.clear();
        let mut issues = Vec::new();
        let mut tab_elements = BTreeMap::new();

        for mapping in &self.tab_mapping {
            let Some(panel) = doc.get_element_by_id(&mapping.panel_element) else {
                issues.push(SettingsIssue::MissingTabPanel {
                    tab: mapping.tab.clone(),
                    element: mapping.panel_element.clone(),
                });
                continue;
            };
            let Some(button) = doc.get_element_by_id(&mapping.button_element) else {
                issues.push(SettingsIssue::MissingTabButton {
                    tab: mapping.tab.clone(),
                    element: mapping.button_element.clone(),
                });
                continue;
            };
            doc.clear_children(panel);
            tab_elements.insert(
                mapping.tab.clone(),
                TabElements {
                    panel,
                    button,
                    select: None,
                    subsections: BTreeMap::new(),
                },
            );
        }

        for tab in &self.registry.tabs {
            if let Some(elements) = tab_elements.get_mut(&tab.name) {
                build_tab(doc, tab, elements);
            }
        }

        for group in &self.registry.options_groups {
            let Some(subsection_panel) = resolve_group_panel(group, &tab_elements, &mut issues) else {
                continue;
            };

            if let (Some(tab), Some(subsection), Some(subheading)) =
                (&group.tab, &group.subsection, &group.subheading)
            {
                match self.registry_subheading(tab, subsection, subheading) {
                    Some(found) => {
                        let heading = doc.append_new(subsection_panel, "h4", None);
                        doc.element_mut(heading).text = format!("{}:", found.label);
                    }
                    None => issues.push(SettingsIssue::UnknownSubheading {
                        tab: tab.clone(),
                        subsection: subsection.clone(),
                        subheading: subheading.clone(),
                    }),
                }
            }

            for option in &group.options {
                let full_name = group.full_option_name(option);
                if let OptionKind::Radio { values, .. } = &option.kind {
                    let count = values.iter().filter(|v| !v.is_line_break()).count();
                    if count > MAX_RADIO_CHOICES {
                        issues.push(SettingsIssue::TooManyRadioChoices {
                            option: full_name.clone(),
                            count,
                        });
                    }
                }
                let option_div = render_option(doc, &full_name, option);
                doc.append_child(subsection_panel, option_div);
            }
        }

        self.tab_elements = tab_elements;
        for issue in issues {
            self.record(issue);
        }
        tracing::debug!(
            tabs = self.tab_elements.len(),
            issues = self.diagnostics.len(),
            "Settings page built"
        );
    }

    // *************** Tabs and subsections ***************

    /// Shows `tab_name`'s panel and marks its button current; hides the rest.
    /// Bindings that do not resolve in `doc` (a document other than the one
    /// `build_page` ran on) are skipped.
    pub fn set_active_tab(&mut self, doc: &mut Document, tab_name: &str) {
        for (name, elements) in &self.tab_elements {
            let is_active = name == tab_name;
            match doc.try_element_mut(elements.panel) {
                Some(panel) => panel.display = if is_active { Display::Block } else { Display::None },
                None => tracing::warn!("setActiveTab: panel for '{name}' is not in this document"),
            }

            let Some(button) = doc.try_element_mut(elements.button) else {
                tracing::warn!("setActiveTab: button for '{name}' is not in this document");
                continue;
            };
            if is_active {
                if !button.has_class("current") {
                    button.class_name = format!("{} current", button.class_name).trim().to_string();
                }
            } else {
                button.class_name = button
                    .class_name
                    .split_whitespace()
                    .filter(|c| *c != "current")
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        }

        if self.tab_elements.contains_key(tab_name) {
            self.active_tab = Some(tab_name.to_string());
        } else {
            tracing::warn!("setActiveTab: No tab element found for '{tab_name}'");
            self.active_tab = None;
        }
    }

    /// Tab click: activates the tab and, if it has a subsection with the name
    /// the user last picked elsewhere, switches to that subsection too.
    pub fn active_tab_changed(&mut self, doc: &mut Document, tab_name: &str) {
        self.set_active_tab(doc, tab_name);

        let matching = self.last_subsection_selected.clone().filter(|last| {
            self.tab_elements
                .get(tab_name)
                .is_some_and(|elements| elements.subsections.contains_key(last))
        });
        if let Some(subsection) = matching {
            self.set_active_subsection(doc, tab_name, &subsection);
        }
    }

    /// Shows one subsection panel of a tab and syncs the tab's selector.
    pub fn set_active_subsection(&mut self, doc: &mut Document, tab_name: &str, subsection_name: &str) {
        let Some(elements) = self.tab_elements.get(tab_name) else {
            tracing::warn!("setActiveSubsection: No tab element found for '{tab_name}'");
            return;
        };

        for (name, panel) in &elements.subsections {
            let Some(panel) = doc.try_element_mut(*panel) else {
                tracing::warn!("setActiveSubsection: panel for '{tab_name}' / '{name}' is not in this document");
                continue;
            };
            panel.display = if name == subsection_name {
                Display::Block
            } else {
                Display::None
            };
        }
        if let Some(select) = elements.select.filter(|select| doc.contains(*select)) {
            doc.set_select_value(select, subsection_name);
        }
    }

    /// Subsection selector change.
    pub fn active_subsection_changed(&mut self, doc: &mut Document, tab_name: &str, subsection_name: &str) {
        self.set_active_subsection(doc, tab_name, subsection_name);
        self.last_subsection_selected = Some(subsection_name.to_string());
    }

    /// Dispatches a click on `node` to its bound handler. Returns whether a
    /// handler ran.
    pub fn click(&mut self, doc: &mut Document, node: NodeId) -> bool {
        let Some(element) = doc.try_element(node) else {
            return false;
        };
        match element.on_click.clone() {
            Some(Handler::ActivateTab(tab)) => {
                self.active_tab_changed(doc, &tab);
                true
            }
            Some(Handler::ActivateSubsection(tab)) => {
                let value = doc.select_value(node);
                self.active_subsection_changed(doc, &tab, &value);
                true
            }
            None => false,
        }
    }

    /// Sets a drop-down to `value` and dispatches its change handler.
    pub fn change(&mut self, doc: &mut Document, node: NodeId, value: &str) -> bool {
        if !doc.contains(node) {
            return false;
        }
        if doc.control_type(node) == Some(ControlType::SelectOne) {
            doc.set_select_value(node, value);
        } else {
            doc.element_mut(node).value = value.to_string();
        }

        match doc.element(node).on_change.clone() {
            Some(Handler::ActivateSubsection(tab)) => {
                self.active_subsection_changed(doc, &tab, value);
                true
            }
            Some(Handler::ActivateTab(tab)) => {
                self.active_tab_changed(doc, &tab);
                true
            }
            None => false,
        }
    }

    // *************** Registry lookups ***************

    pub fn registry_tab(&self, tab_name: &str) -> Option<&Tab> {
        let tab = self.registry.tabs.iter().find(|t| t.name == tab_name);
        if tab.is_none() {
            tracing::debug!("getRegistryTab: not found: {tab_name}");
        }
        tab
    }

    pub fn registry_subsection(&self, tab_name: &str, subsection_name: &str) -> Option<&Subsection> {
        let subsection = self
            .registry_tab(tab_name)?
            .subsections
            .iter()
            .find(|s| s.name == subsection_name);
        if subsection.is_none() {
            tracing::debug!("getRegistrySubsection: not found: {tab_name}, {subsection_name}");
        }
        subsection
    }

    pub fn registry_subheading(
        &self,
        tab_name: &str,
        subsection_name: &str,
        subheading_name: &str,
    ) -> Option<&Subheading> {
        let subheading = self
            .registry_subsection(tab_name, subsection_name)?
            .subheadings
            .iter()
            .find(|s| s.name == subheading_name);
        if subheading.is_none() {
            tracing::debug!("getRegistrySubheading: not found: {tab_name}, {subsection_name}, {subheading_name}");
        }
        subheading
    }

    // *************** Reading and writing values ***************

    /// Full option name -> declared default, for every option except spacers.
    pub fn default_options(&self) -> Settings {
        let mut defaults = Settings::new();
        for group in &self.registry.options_groups {
            for option in &group.options {
                if let Some(value) = option.kind.default_setting() {
                    defaults.insert(group.full_option_name(option), value);
                }
            }
        }
        tracing::debug!(count = defaults.len(), "Default options collected");
        defaults
    }

    /// Re-reads the control behind every key of `current`, stores the live
    /// value back into `current`, and reports whether anything differed.
    /// Keys without a readable control keep their value and never count as changed.
    pub fn has_settings_changed(&self, doc: &Document, current: &mut Settings) -> bool {
        let mut changed = false;
        for (name, stored) in current.iter_mut() {
            let Some(live) = read_control(doc, name, false) else {
                continue;
            };
            if !stored.loosely_eq(&live) {
                tracing::debug!(setting = %name, ?stored, ?live, "Setting changed");
                changed = true;
            }
            *stored = live;
        }
        changed
    }

    /// Reads every option's control, starting from the defaults so options
    /// without a control keep their default.
    pub fn read_options(&self, doc: &Document) -> Settings {
        let mut options = self.default_options();
        for (name, value) in options.iter_mut() {
            match read_control(doc, name, true) {
                Some(live) => *value = live,
                None => tracing::debug!("readOptions: no element found with id: {name}"),
            }
        }
        options
    }

    /// Pushes stored values into the controls.
    pub fn restore_options(&self, doc: &mut Document, settings: &Settings) {
        for group in &self.registry.options_groups {
            for option in &group.options {
                let full_name = group.full_option_name(option);
                let Some(value) = settings.get(&full_name) else {
                    continue;
                };

                match &option.kind {
                    OptionKind::Br => {}
                    OptionKind::Radio { .. } => {
                        let wanted = value.as_input_value();
                        let radio = radio_ids(&full_name)
                            .filter_map(|id| doc.get_element_by_id(&id))
                            .find(|node| doc.element(*node).value == wanted);
                        match radio {
                            Some(node) => doc.check_radio(node),
                            None => tracing::debug!("restoreOptions: no radio choice '{wanted}' for {full_name}"),
                        }
                    }
                    kind => {
                        let Some(node) = doc.get_element_by_id(&full_name) else {
                            tracing::debug!("restoreOptions: no element found with id: {full_name}");
                            continue;
                        };
                        match kind {
                            OptionKind::Checkbox { .. } => {
                                doc.element_mut(node).checked = *value == SettingValue::Bool(true);
                            }
                            OptionKind::Select { .. } => {
                                doc.set_select_value(node, &value.as_input_value());
                            }
                            _ => doc.element_mut(node).value = value.as_input_value(),
                        }
                    }
                }
            }
        }
    }
}

fn create_tab_mapping(registry: &OptionsRegistry) -> Vec<TabMapping> {
    registry
        .tabs
        .iter()
        .map(|tab| TabMapping {
            tab: tab.name.clone(),
            panel_element: format!("{}-panel", tab.name),
            button_element: format!("{}-tab", tab.name),
        })
        .collect()
}

fn radio_ids(full_name: &str) -> impl Iterator<Item = String> + '_ {
    (1..=MAX_RADIO_CHOICES).map(move |n| format!("{full_name}_radio{n}"))
}

/// Live value of the control named `name`. Radio groups have no element of
/// their own, so a name without an element is probed as `<name>_radio<N>`.
/// Colour inputs are only read when `include_color` is set.
fn read_control(doc: &Document, name: &str, include_color: bool) -> Option<SettingValue> {
    if let Some(node) = doc.get_element_by_id(name) {
        let element = doc.element(node);
        return match doc.control_type(node)? {
            ControlType::Checkbox => Some(SettingValue::Bool(element.checked)),
            ControlType::Number => Some(SettingValue::Text(element.value.clone())),
            ControlType::SelectOne => Some(SettingValue::Text(doc.select_value(node))),
            ControlType::Color if include_color => Some(SettingValue::Text(element.value.clone())),
            ControlType::Color | ControlType::Radio => None,
        };
    }

    doc.get_element_by_id(&format!("{name}_radio1"))?;
    radio_ids(name)
        .filter_map(|id| doc.get_element_by_id(&id))
        .find(|node| doc.element(*node).checked)
        .map(|node| SettingValue::Text(doc.element(node).value.clone()))
}

/// Finds the subsection panel an options group renders into.
fn resolve_group_panel(
    group: &OptionsGroup,
    tab_elements: &BTreeMap<String, TabElements>,
    issues: &mut Vec<SettingsIssue>,
) -> Option<NodeId> {
    let Some(tab) = &group.tab else {
        issues.push(SettingsIssue::GroupWithoutTab {
            category: group.category.clone(),
            subcategory: group.subcategory.clone(),
        });
        return None;
    };
    let Some(subsection) = &group.subsection else {
        issues.push(SettingsIssue::GroupWithoutSubsection {
            category: group.category.clone(),
            subcategory: group.subcategory.clone(),
        });
        return None;
    };
    let Some(elements) = tab_elements.get(tab) else {
        issues.push(SettingsIssue::UnboundTab { tab: tab.clone() });
        return None;
    };
    let panel = elements.subsections.get(subsection).copied();
    if panel.is_none() {
        issues.push(SettingsIssue::UnknownSubsection {
            tab: tab.clone(),
            subsection: subsection.clone(),
        });
    }
    panel
}

/// Tab comment, subsection selector and one empty panel per subsection.
fn build_tab(doc: &mut Document, tab: &Tab, elements: &mut TabElements) {
    doc.element_mut(elements.button).on_click = Some(Handler::ActivateTab(tab.name.clone()));
    let panel = elements.panel;

    if let Some(comment) = &tab.comment {
        let label = doc.append_new(panel, "label", None);
        let label_element = doc.element_mut(label);
        label_element.text = comment.clone();
        label_element.class_name = "tabComment".to_string();
        doc.append_new(panel, "br", None);
        doc.append_new(panel, "br", None);
    }

    // Rendered even for a single subsection so every tab looks the same
    let selector_label = doc.append_new(panel, "label", None);
    let caption = doc.create_text_node("Subsection: ");
    doc.append_child(selector_label, caption);
    let select = doc.append_new(selector_label, "select", None);
    for subsection in &tab.subsections {
        let option = doc.append_new(select, "option", None);
        let option = doc.element_mut(option);
        option.value = subsection.name.clone();
        option.text = subsection.label.clone();
    }
    doc.element_mut(select).on_change = Some(Handler::ActivateSubsection(tab.name.clone()));
    let label_element = doc.element_mut(selector_label);
    label_element.class_name = "subsectionSelector".to_string();
    if tab.hide_select {
        label_element.display = Display::None;
    }
    elements.select = Some(select);

    let container = doc.append_new(panel, "div", None);
    doc.element_mut(container).class_name = "subsectionsContainer".to_string();
    for subsection in &tab.subsections {
        let subsection_panel = doc.append_new(container, "div", None);
        doc.element_mut(subsection_panel).class_name = "subsectionPanel".to_string();
        elements.subsections.insert(subsection.name.clone(), subsection_panel);
    }
}

/// Builds the `<div>` for one option; the caller attaches it.
fn render_option(doc: &mut Document, full_name: &str, option: &OptionSpec) -> NodeId {
    let option_div = doc.create_element("div");

    match &option.kind {
        OptionKind::Checkbox { default_value } => {
            let label = doc.append_new(option_div, "label", None);
            let input = new_input(doc, label, full_name, "checkbox", "optionCheckbox");
            doc.element_mut(input).checked = *default_value;
            let text = doc.create_text_node(&format!(" {}", option.label));
            doc.append_child(label, text);
        }
        OptionKind::Radio { values, default_value } => {
            let label = doc.append_new(option_div, "label", None);
            if !option.label.is_empty() {
                let text = doc.create_text_node(&format!("{}: ", option.label));
                doc.append_child(label, text);
            }

            let mut radio_num = 0;
            for choice in values {
                if choice.is_line_break() {
                    doc.append_new(label, "br", None);
                    continue;
                }
                radio_num += 1;
                let radio = doc.append_new(label, "input", Some(&format!("{full_name}_radio{radio_num}")));
                let radio = doc.element_mut(radio);
                radio.input_type = Some("radio".to_string());
                radio.name = Some(format!("{full_name}_radio"));
                radio.value = choice.value.clone();
                radio.checked = default_value.as_deref() == Some(choice.value.as_str());

                let text = doc.create_text_node(&format!(" {}", choice.text));
                doc.append_child(label, text);
            }
        }
        OptionKind::Select { values, default_value } => {
            let label = labelled(doc, option_div, &option.label);
            let select = doc.append_new(label, "select", Some(full_name));
            doc.element_mut(select).class_name = "optionSelect".to_string();
            for choice in values {
                let entry = doc.append_new(select, "option", None);
                let entry = doc.element_mut(entry);
                entry.value = choice.value.clone();
                entry.text = choice.text.clone();
                entry.selected = default_value.as_deref() == Some(choice.value.as_str());
            }
        }
        OptionKind::Number { default_value } => {
            let label = labelled(doc, option_div, &option.label);
            let input = new_input(doc, label, full_name, "number", "optionNumber");
            if let Some(default_value) = default_value {
                doc.element_mut(input).value = default_value.to_string();
            }
        }
        OptionKind::Color { .. } => {
            let label = labelled(doc, option_div, &option.label);
            new_input(doc, label, full_name, "color", "optionNumber");
        }
        OptionKind::Br => {
            doc.append_new(option_div, "label", Some(full_name));
        }
    }

    if let Some(comment) = &option.comment {
        doc.append_new(option_div, "br", None);
        let comment_label = doc.append_new(option_div, "label", None);
        let comment_label = doc.element_mut(comment_label);
        comment_label.text = comment.clone();
        comment_label.class_name = "optionComment".to_string();
    }
    doc.append_new(option_div, "br", None);

    option_div
}

/// `<label>Label: </label>` under `parent`, ready for its control.
fn labelled(doc: &mut Document, parent: NodeId, label: &str) -> NodeId {
    let node = doc.append_new(parent, "label", None);
    let text = doc.create_text_node(&format!("{label}: "));
    doc.append_child(node, text);
    node
}

fn new_input(doc: &mut Document, parent: NodeId, id: &str, input_type: &str, class: &str) -> NodeId {
    let input = doc.append_new(parent, "input", Some(id));
    let element = doc.element_mut(input);
    element.input_type = Some(input_type.to_string());
    element.class_name = class.to_string();
    input
}
