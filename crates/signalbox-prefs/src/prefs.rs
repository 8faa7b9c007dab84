// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Records held by the preference registry: per-class reminders and choices,
//! and per-window geometry with a property bag.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A suppressible prompt tied to a class and item key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Item key (e.g. `remindSaveRoute`).
    pub item: String,
    /// True once the user asked not to be reminded again.
    pub state: bool,
    /// Human-readable description shown in the messages pane.
    pub description: String,
}

impl Reminder {
    pub(crate) fn new(item: impl Into<String>, state: bool) -> Self {
        Self {
            item: item.into(),
            state,
            description: String::new(),
        }
    }
}

/// A named setting with an enumerated set of options and a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultipleChoice {
    item: String,
    value: i32,
    default: i32,
    description: String,
    options: BTreeMap<i32, String>,
}

impl MultipleChoice {
    /// Value of a choice that has neither been answered nor described.
    pub const UNSET: i32 = -1;

    pub(crate) fn with_value(item: impl Into<String>, value: i32) -> Self {
        Self {
            item: item.into(),
            value,
            default: Self::UNSET,
            description: String::new(),
            options: BTreeMap::new(),
        }
    }

    pub(crate) fn described(
        item: impl Into<String>,
        description: String,
        options: BTreeMap<i32, String>,
        default: i32,
    ) -> Self {
        let mut choice = Self::with_value(item, Self::UNSET);
        choice.set_details(description, options, default);
        choice
    }

    /// Replace description, options and default. An unset value takes the default.
    pub(crate) fn set_details(
        &mut self,
        description: String,
        options: BTreeMap<i32, String>,
        default: i32,
    ) {
        self.description = description;
        self.options = options;
        self.default = default;
        if self.value == Self::UNSET {
            self.value = default;
        }
    }

    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    /// Select the option whose label is `label`. Returns false when no option matches.
    pub(crate) fn select_label(&mut self, label: &str) -> bool {
        match self.options.iter().find(|(_, l)| l.as_str() == label) {
            Some((key, _)) => {
                self.value = *key;
                true
            }
            None => false,
        }
    }

    /// Item key.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Selected option key.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Default option key.
    pub fn default_value(&self) -> i32 {
        self.default
    }

    /// Description shown next to the option list.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Option key to label table.
    pub fn options(&self) -> &BTreeMap<i32, String> {
        &self.options
    }

    /// True when the selected value equals the default (and so is not persisted).
    pub fn is_default(&self) -> bool {
        self.value == self.default
    }
}

/// Everything remembered for one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassPreferences {
    /// Description supplied by the class's provider.
    pub description: Option<String>,
    /// Reminder prompts in registration order.
    pub reminders: Vec<Reminder>,
    /// Multiple-choice settings in registration order.
    pub choices: Vec<MultipleChoice>,
}

impl ClassPreferences {
    /// Reminder for `item`.
    pub fn reminder(&self, item: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.item == item)
    }

    pub(crate) fn reminder_mut(&mut self, item: &str) -> Option<&mut Reminder> {
        self.reminders.iter_mut().find(|r| r.item == item)
    }

    /// Multiple choice for `item`.
    pub fn choice(&self, item: &str) -> Option<&MultipleChoice> {
        self.choices.iter().find(|c| c.item == item)
    }

    pub(crate) fn choice_mut(&mut self, item: &str) -> Option<&mut MultipleChoice> {
        self.choices.iter_mut().find(|c| c.item == item)
    }

    /// Reminders plus choices.
    pub fn len(&self) -> usize {
        self.reminders.len() + self.choices.len()
    }

    /// True when the class has neither reminders nor choices.
    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty() && self.choices.is_empty()
    }
}

/// Screen position of a window's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True for the 0x0 placeholder size.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Typed value stored in a window's property bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Free text.
    Text(String),
}

impl PropertyValue {
    /// Type tag written to the `class` attribute of a persisted value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    /// Rebuild a value from its type tag and text. `None` for unknown tags or unparsable text.
    pub fn parse(type_name: &str, text: &str) -> Option<Self> {
        match type_name {
            "bool" => text.trim().parse().ok().map(Self::Bool),
            "int" => text.trim().parse().ok().map(Self::Int),
            "float" => text.trim().parse().ok().map(Self::Float),
            "text" => Some(Self::Text(text.to_owned())),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Geometry, save flags and properties remembered for one window class.
///
/// The two save flags are independent; setting a location or size turns on
/// only its own flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowDetails {
    location: Point,
    size: Size,
    save_location: bool,
    save_size: bool,
    properties: BTreeMap<String, PropertyValue>,
}

impl WindowDetails {
    /// Last stored location.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Last stored size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether the location is persisted.
    pub fn save_location(&self) -> bool {
        self.save_location
    }

    /// Whether the size is persisted.
    pub fn save_size(&self) -> bool {
        self.save_size
    }

    /// Property bag.
    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub(crate) fn set_location(&mut self, location: Point) {
        self.location = location;
        self.save_location = true;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
        self.save_size = true;
    }

    pub(crate) fn set_save_location(&mut self, save: bool) {
        self.save_location = save;
    }

    pub(crate) fn set_save_size(&mut self, save: bool) {
        self.save_size = save;
    }

    pub(crate) fn set_property(&mut self, key: &str, value: Option<PropertyValue>) {
        match value {
            Some(value) => {
                self.properties.insert(key.to_owned(), value);
            }
            None => {
                self.properties.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn described_choice_takes_default_only_when_unset() {
        let options = BTreeMap::from([(0, "Ask".to_owned()), (1, "Always".to_owned())]);
        let fresh = MultipleChoice::described("deleteRoute", "Delete".into(), options.clone(), 1);
        assert_eq!(fresh.value(), 1);
        assert!(fresh.is_default());

        let mut answered = MultipleChoice::with_value("deleteRoute", 0);
        answered.set_details("Delete".into(), options, 1);
        assert_eq!(answered.value(), 0);
        assert_eq!(answered.default_value(), 1);
        assert!(!answered.is_default());
    }

    #[test]
    fn select_label_matches_option_text() {
        let options = BTreeMap::from([(0, "Ask".to_owned()), (2, "Never".to_owned())]);
        let mut choice = MultipleChoice::described("x", String::new(), options, 0);
        assert!(choice.select_label("Never"));
        assert_eq!(choice.value(), 2);
        assert!(!choice.select_label("Sometimes"));
        assert_eq!(choice.value(), 2);
    }

    #[test]
    fn property_values_parse_from_type_tag() {
        assert_eq!(PropertyValue::parse("bool", "true"), Some(PropertyValue::Bool(true)));
        assert_eq!(PropertyValue::parse("int", " 42 "), Some(PropertyValue::Int(42)));
        assert_eq!(PropertyValue::parse("float", "0.5"), Some(PropertyValue::Float(0.5)));
        assert_eq!(
            PropertyValue::parse("text", " padded "),
            Some(PropertyValue::Text(" padded ".into()))
        );
        assert_eq!(PropertyValue::parse("int", "four"), None);
        assert_eq!(PropertyValue::parse("java.awt.Color", "red"), None);
    }

    #[test]
    fn window_flags_follow_their_own_setter() {
        let mut window = WindowDetails::default();
        window.set_size(Size::new(800, 600));
        assert!(window.save_size());
        assert!(!window.save_location());
        window.set_property("sort", Some(PropertyValue::Int(2)));
        window.set_property("sort", None);
        assert!(window.properties().is_empty());
    }
}
