// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoding and decoding of the five persisted preference sections.
//!
//! Decoders never fail: entries with missing or malformed attributes are
//! logged and skipped so that defaults stay in place.

use crate::id::ClassId;
use crate::prefs::{ClassPreferences, Point, PropertyValue, Size, WindowDetails};
use crate::xml::Element;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

/// Element name and namespace of one persisted section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Fragment root element name.
    pub element: &'static str,
    /// Fragment namespace URI.
    pub namespace: &'static str,
}

impl Section {
    /// Empty fragment root for this section.
    pub fn root(&self) -> Element {
        Element::with_namespace(self.element, self.namespace)
    }
}

/// Per-class reminders and multiple choices.
pub const CLASS_PREFERENCES: Section = Section {
    element: "classPreferences",
    namespace: "http://jmri.org/xml/schema/auxiliary-configuration/class-preferences-4-3-5.xsd",
};
/// Combo-box last selections.
pub const COMBO_BOXES: Section = Section {
    element: "comboBoxLastValue",
    namespace: "http://jmri.org/xml/schema/auxiliary-configuration/combobox-4-3-5.xsd",
};
/// Check-box last states.
pub const CHECK_BOXES: Section = Section {
    element: "checkBoxLastValue",
    namespace: "http://jmri.org/xml/schema/auxiliary-configuration/checkbox-4-21-3.xsd",
};
/// Simple settings (presence means true).
pub const SETTINGS: Section = Section {
    element: "settings",
    namespace: "http://jmri.org/xml/schema/auxiliary-configuration/settings-4-3-5.xsd",
};
/// Window geometry and properties.
pub const WINDOWS: Section = Section {
    element: "windowDetails",
    namespace: "http://jmri.org/xml/schema/auxiliary-configuration/window-details-4-3-5.xsd",
};

const CLASS: &str = "class";
const VALUE: &str = "value";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const PROPERTIES: &str = "properties";
const REMINDER: &str = "reminder";

/// Class-preferences entry as read from a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedClass {
    /// Owning class.
    pub class: ClassId,
    /// `(item, value)` for each persisted (non-default) choice.
    pub choices: Vec<(String, i32)>,
    /// Items whose reminder is switched off.
    pub reminders: Vec<String>,
}

/// Window entry as read from a fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedWindow {
    /// Window class.
    pub class: ClassId,
    /// Location, when both coordinates were present and numeric.
    pub location: Option<Point>,
    /// Size, when both dimensions were present and numeric.
    pub size: Option<Size>,
    /// Properties with a recognised value type.
    pub properties: Vec<(String, PropertyValue)>,
}

/// Encode class preferences. Only non-default choices and switched-off
/// reminders are written; `None` when no class has anything to write.
pub fn encode_class_preferences(classes: &BTreeMap<ClassId, ClassPreferences>) -> Option<Element> {
    let mut root = CLASS_PREFERENCES.root();
    for (class, prefs) in classes {
        if prefs.is_empty() {
            continue;
        }
        let mut element = Element::new("preferences").with_attribute(CLASS, class.as_str());

        let mut choices = Element::new("multipleChoice");
        for choice in prefs.choices.iter().filter(|c| !c.is_default()) {
            choices.push(
                Element::new("option")
                    .with_attribute("item", choice.item())
                    .with_attribute(VALUE, choice.value().to_string()),
            );
        }
        if choices.has_children() {
            element.push(choices);
        }

        let mut reminders = Element::new("reminderPrompts");
        for reminder in prefs.reminders.iter().filter(|r| r.state) {
            reminders.push(Element::new(REMINDER).with_text(reminder.item.as_str()));
        }
        if reminders.has_children() {
            element.push(reminders);
        }

        root.push(element);
    }
    root.has_children().then_some(root)
}

/// Decode class preferences.
pub fn decode_class_preferences(root: &Element) -> Vec<DecodedClass> {
    let mut out = Vec::new();
    for preferences in root.children_named("preferences") {
        let Some(class) = preferences.attribute(CLASS) else {
            error!("class preferences entry without a class attribute");
            continue;
        };
        debug!(class, "reading class preferences");
        let mut decoded = DecodedClass {
            class: ClassId::new(class),
            ..DecodedClass::default()
        };
        for option in preferences
            .children_named("multipleChoice")
            .flat_map(|mc| mc.children_named("option"))
        {
            let Some(item) = option.attribute("item") else {
                error!(class, "multiple choice option without an item");
                continue;
            };
            match option.attribute(VALUE).map(str::trim).map(str::parse::<i32>) {
                Some(Ok(value)) => decoded.choices.push((item.to_owned(), value)),
                _ => error!(class, item, "failed to convert multiple choice value"),
            }
        }
        for reminder in preferences
            .children_named("reminderPrompts")
            .flat_map(|rp| rp.children_named(REMINDER))
        {
            if let Some(item) = reminder.text() {
                decoded.reminders.push(item.to_owned());
            }
        }
        out.push(decoded);
    }
    out
}

/// Encode combo-box selections, skipping blank values. `None` while the map is empty.
pub fn encode_combo_boxes(selections: &BTreeMap<String, String>) -> Option<Element> {
    if selections.is_empty() {
        return None;
    }
    let mut root = COMBO_BOXES.root();
    for (name, value) in selections.iter().filter(|(_, v)| !v.is_empty()) {
        root.push(
            Element::new("comboBox")
                .with_attribute("name", name.as_str())
                .with_attribute("lastSelected", value.as_str()),
        );
    }
    Some(root)
}

/// Decode combo-box selections.
pub fn decode_combo_boxes(root: &Element) -> Vec<(String, String)> {
    root.children_named("comboBox")
        .filter_map(|combo| {
            let name = combo.attribute("name")?;
            let value = combo.attribute("lastSelected")?;
            Some((name.to_owned(), value.to_owned()))
        })
        .collect()
}

/// Encode check-box states as `yes`/`no`. `None` while the map is empty.
pub fn encode_check_boxes(states: &BTreeMap<String, bool>) -> Option<Element> {
    if states.is_empty() {
        return None;
    }
    let mut root = CHECK_BOXES.root();
    for (name, checked) in states {
        root.push(
            Element::new("checkBox")
                .with_attribute("name", name.as_str())
                .with_attribute("lastChecked", if *checked { "yes" } else { "no" }),
        );
    }
    Some(root)
}

/// Decode check-box states; anything other than `yes` reads as unchecked.
pub fn decode_check_boxes(root: &Element) -> Vec<(String, bool)> {
    root.children_named("checkBox")
        .filter_map(|checkbox| {
            let name = checkbox.attribute("name")?;
            Some((name.to_owned(), checkbox.attribute("lastChecked") == Some("yes")))
        })
        .collect()
}

/// Encode simple settings. Always produces a fragment so removals are persisted.
pub fn encode_settings(settings: &BTreeSet<String>) -> Element {
    let mut root = SETTINGS.root();
    for name in settings {
        root.push(Element::new("setting").with_text(name.as_str()));
    }
    root
}

/// Decode simple settings.
pub fn decode_settings(root: &Element) -> Vec<String> {
    root.children_named("setting")
        .filter_map(Element::text)
        .map(str::to_owned)
        .collect()
}

/// Encode window details. Location is written only when its save flag is
/// set, size only when its flag is set and it is not 0x0. `None` while the
/// map is empty.
pub fn encode_windows(windows: &BTreeMap<ClassId, WindowDetails>) -> Option<Element> {
    if windows.is_empty() {
        return None;
    }
    let mut root = WINDOWS.root();
    for (class, details) in windows {
        let mut window = Element::new("window").with_attribute(CLASS, class.as_str());
        if details.save_location() {
            let location = details.location();
            window.set_attribute("locX", location.x.to_string());
            window.set_attribute("locY", location.y.to_string());
        }
        if details.save_size() && !details.size().is_zero() {
            let size = details.size();
            window.set_attribute(WIDTH, size.width.to_string());
            window.set_attribute(HEIGHT, size.height.to_string());
        }
        if !details.properties().is_empty() {
            let mut properties = Element::new(PROPERTIES);
            for (key, value) in details.properties() {
                properties.push(
                    Element::new("property")
                        .with_child(Element::new("key").with_text(key.as_str()))
                        .with_child(
                            Element::new(VALUE)
                                .with_attribute(CLASS, value.type_name())
                                .with_text(value.to_string()),
                        ),
                );
            }
            window.push(properties);
        }
        root.push(window);
    }
    Some(root)
}

/// Decode window details. Fractional geometry is truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn decode_windows(root: &Element) -> Vec<DecodedWindow> {
    let mut out = Vec::new();
    for window in root.children_named("window") {
        let Some(class) = window.attribute(CLASS) else {
            error!("window entry without a class attribute");
            continue;
        };
        debug!(class, "reading window details");
        let mut decoded = DecodedWindow {
            class: ClassId::new(class),
            ..DecodedWindow::default()
        };
        match numeric_pair(window, "locX", "locY") {
            Ok(Some((x, y))) => decoded.location = Some(Point::new(x as i32, y as i32)),
            Ok(None) => {}
            Err(()) => error!(class, "unable to read location of window"),
        }
        match numeric_pair(window, WIDTH, HEIGHT) {
            Ok(Some((w, h))) => decoded.size = Some(Size::new(w as u32, h as u32)),
            Ok(None) => {}
            Err(()) => error!(class, "unable to read dimensions of window"),
        }
        if let Some(properties) = window.child(PROPERTIES) {
            for property in properties.children() {
                let Some(key) = property.child("key").and_then(Element::text) else {
                    error!(class, "window property without a key");
                    continue;
                };
                let Some(value) = property.child(VALUE) else {
                    debug!(class, key, "window property has no value");
                    continue;
                };
                let type_name = value.attribute(CLASS).unwrap_or_default();
                match PropertyValue::parse(type_name, value.text().unwrap_or_default()) {
                    Some(parsed) => decoded.properties.push((key.to_owned(), parsed)),
                    None => error!(class, key, type_name, "unable to retrieve window property"),
                }
            }
        }
        out.push(decoded);
    }
    out
}

/// Both attributes parsed as numbers; `Ok(None)` when either is absent.
fn numeric_pair(element: &Element, a: &str, b: &str) -> Result<Option<(f64, f64)>, ()> {
    let (Some(a), Some(b)) = (element.attribute(a), element.attribute(b)) else {
        return Ok(None);
    };
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) if a.is_finite() && b.is_finite() => Ok(Some((a, b))),
        _ => Err(()),
    }
}
