// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The preference registry: single owner of every remembered UI preference.
//!
//! Every mutation marks the registry dirty and, while saving is allowed,
//! writes the affected section to the [`FragmentStore`] straight away. With
//! saving disabled, mutations only accumulate; re-enabling flushes all
//! sections in a single store write.

use crate::config::{FragmentStore, PrefsError};
use crate::fragments::{
    self, Section, CHECK_BOXES, CLASS_PREFERENCES, COMBO_BOXES, SETTINGS, WINDOWS,
};
use crate::id::ClassId;
use crate::prefs::{
    ClassPreferences, MultipleChoice, Point, PropertyValue, Reminder, Size, WindowDetails,
};
use crate::prompt_port::{MessageKind, MessagePrompter, MessageRequest, Prompt};
use crate::provider::{ChoiceSink, Declaration, PreferenceProvider};
use crate::xml::Element;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{mpsc, Arc};
use tracing::{debug, error, trace, warn};

/// Class id under which the registry keeps its own reminder.
pub const REGISTRY_CLASS: &str = "signalbox.prefs.PreferenceRegistry";
/// Item key of the "where to revert this" reminder.
pub const REMINDER_ITEM: &str = "reminder";
/// Base window class whose geometry is never remembered.
pub const GENERIC_WINDOW_CLASS: &str = "signalbox.swing.Frame";

/// Tunables for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Window classes ignored by every window mutator.
    pub ignored_window_classes: BTreeSet<ClassId>,
    /// Old class ids redirected to their replacement when setting reminders.
    pub class_aliases: BTreeMap<ClassId, ClassId>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            ignored_window_classes: BTreeSet::from([ClassId::new(GENERIC_WINDOW_CLASS)]),
            class_aliases: BTreeMap::new(),
        }
    }
}

/// Notifications emitted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsEvent {
    /// The save gate changed.
    SaveAllowedChanged {
        /// Previous value.
        old: bool,
        /// Current value.
        new: bool,
    },
    /// Class preferences changed.
    PreferencesUpdated,
}

/// Borrowed, serializable view of every persisted section.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    /// Simple settings that are on.
    pub settings: &'a BTreeSet<String>,
    /// Combo-box last selections.
    pub combo_boxes: &'a BTreeMap<String, String>,
    /// Check-box last states.
    pub check_boxes: &'a BTreeMap<String, bool>,
    /// Per-class reminders and choices.
    pub classes: &'a BTreeMap<ClassId, ClassPreferences>,
    /// Per-window geometry and properties.
    pub windows: &'a BTreeMap<ClassId, WindowDetails>,
}

struct RegistryPreferences;

impl PreferenceProvider for RegistryPreferences {
    fn class_id(&self) -> ClassId {
        ClassId::new(REGISTRY_CLASS)
    }

    fn describe(&self) -> Option<String> {
        Some("User Preferences".to_owned())
    }

    fn register_choices(&self, sink: &mut ChoiceSink) {
        sink.reminder(REMINDER_ITEM, "Hide reminder location message");
    }
}

/// Registry of user-interface preferences backed by a [`FragmentStore`].
pub struct PreferenceRegistry<S> {
    store: S,
    options: RegistryOptions,
    save_allowed: bool,
    dirty: bool,
    loading: bool,
    simple: BTreeSet<String>,
    session: BTreeSet<String>,
    combo_boxes: BTreeMap<String, String>,
    check_boxes: BTreeMap<String, bool>,
    classes: BTreeMap<ClassId, ClassPreferences>,
    windows: BTreeMap<ClassId, WindowDetails>,
    providers: BTreeMap<ClassId, Arc<dyn PreferenceProvider>>,
    prompter: Option<Box<dyn MessagePrompter>>,
    listeners: Vec<mpsc::Sender<PrefsEvent>>,
}

impl<S: FragmentStore> PreferenceRegistry<S> {
    /// Create a registry with default options.
    pub fn new(store: S) -> Self {
        Self::with_options(store, RegistryOptions::default())
    }

    /// Create a registry. Nothing is read from the store until [`Self::load`].
    pub fn with_options(store: S, options: RegistryOptions) -> Self {
        let mut registry = Self {
            store,
            options,
            save_allowed: false,
            dirty: false,
            loading: false,
            simple: BTreeSet::new(),
            session: BTreeSet::new(),
            combo_boxes: BTreeMap::new(),
            check_boxes: BTreeMap::new(),
            classes: BTreeMap::new(),
            windows: BTreeMap::new(),
            providers: BTreeMap::new(),
            prompter: None,
            listeners: Vec::new(),
        };
        let own = ClassId::new(REGISTRY_CLASS);
        registry.classes.insert(own.clone(), ClassPreferences::default());
        registry
            .providers
            .insert(own.clone(), Arc::new(RegistryPreferences));
        registry.set_class_description(&own);
        registry.save_allowed = true;
        registry.dirty = false;
        registry
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the registry and return the backing store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Options the registry was built with.
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Attach the UI layer that displays messages.
    pub fn set_prompter(&mut self, prompter: impl MessagePrompter + 'static) {
        self.prompter = Some(Box::new(prompter));
    }

    /// Receive [`PrefsEvent`]s. Dropped receivers are pruned on the next event.
    pub fn subscribe(&mut self) -> mpsc::Receiver<PrefsEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn emit(&mut self, event: PrefsEvent) {
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }

    // ── Save gate and lifecycle ──────────────────────────────────────

    /// Enable or disable writes. Enabling while dirty flushes every section once.
    pub fn set_save_allowed(&mut self, allowed: bool) {
        let old = self.save_allowed;
        self.save_allowed = allowed;
        if allowed && self.dirty {
            if let Err(err) = self.flush() {
                error!(?err, "unable to save user preferences");
            }
        }
        if old != allowed {
            self.emit(PrefsEvent::SaveAllowedChanged { old, new: allowed });
        }
    }

    /// Whether mutations are written immediately.
    pub fn is_save_allowed(&self) -> bool {
        self.save_allowed
    }

    /// True when some mutation has not reached the store yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the registry dirty, optionally announcing
    /// [`PrefsEvent::PreferencesUpdated`] (never while loading).
    pub fn mark_dirty(&mut self, fire_update: bool) {
        self.dirty = true;
        if fire_update && !self.loading {
            self.emit(PrefsEvent::PreferencesUpdated);
        }
    }

    /// Forget pending changes (used after an initial load).
    pub fn reset_dirty(&mut self) {
        self.dirty = false;
    }

    /// Whether preferences are being read from storage.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Enter loading mode: reminder notices are not shown.
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Leave loading mode and forget changes made while loading.
    pub fn finish_loading(&mut self) {
        self.loading = false;
        self.reset_dirty();
    }

    /// Read every section from the store.
    ///
    /// Saving is disabled while reading and the changes made by the load are
    /// not counted as mutations. Saving is re-enabled afterwards; changes
    /// that were pending before the load are flushed then.
    pub fn load(&mut self) -> Result<(), PrefsError> {
        debug!("loading user interface preferences");
        let was_allowed = self.save_allowed;
        let pending = self.dirty;
        self.save_allowed = false;
        self.set_loading();
        let result = self.read_sections();
        self.finish_loading();
        self.dirty = pending;
        self.save_allowed = was_allowed;
        self.set_save_allowed(true);
        result
    }

    /// Write every section in one store write.
    pub fn flush(&mut self) -> Result<(), PrefsError> {
        let sections: Vec<Element> = [
            fragments::encode_combo_boxes(&self.combo_boxes),
            fragments::encode_check_boxes(&self.check_boxes),
            fragments::encode_class_preferences(&self.classes),
            Some(fragments::encode_settings(&self.simple)),
            fragments::encode_windows(&self.windows),
        ]
        .into_iter()
        .flatten()
        .collect();
        trace!(sections = sections.len(), "flushing user preferences");
        self.store.save_fragments(&sections)?;
        self.dirty = false;
        Ok(())
    }

    fn read_sections(&mut self) -> Result<(), PrefsError> {
        if let Some(root) = self.load_section(COMBO_BOXES)? {
            self.combo_boxes
                .extend(fragments::decode_combo_boxes(&root));
        }
        if let Some(root) = self.load_section(CHECK_BOXES)? {
            self.check_boxes
                .extend(fragments::decode_check_boxes(&root));
        }
        if let Some(root) = self.load_section(CLASS_PREFERENCES)? {
            for decoded in fragments::decode_class_preferences(&root) {
                for (item, value) in &decoded.choices {
                    self.set_multiple_choice_option(&decoded.class, item, *value);
                }
                for item in &decoded.reminders {
                    debug!(class = %decoded.class, item = %item, "restoring reminder state");
                    self.set_preference_state(&decoded.class, item, true);
                }
            }
        }
        if let Some(root) = self.load_section(SETTINGS)? {
            self.simple.extend(fragments::decode_settings(&root));
        }
        if let Some(root) = self.load_section(WINDOWS)? {
            for window in fragments::decode_windows(&root) {
                if let Some(location) = window.location {
                    self.set_window_location(&window.class, location);
                }
                if let Some(size) = window.size {
                    self.set_window_size(&window.class, size);
                }
                for (key, value) in window.properties {
                    self.set_property(&window.class, &key, Some(value));
                }
            }
        }
        Ok(())
    }

    fn load_section(&self, section: Section) -> Result<Option<Element>, PrefsError> {
        self.store.load_fragment(section.element, section.namespace)
    }

    /// Mark dirty and, if allowed, write the section produced by `encode`.
    /// A registry that was already dirty (an earlier write failed) flushes
    /// every section instead. Write failures are logged and leave the
    /// registry dirty.
    fn save_section<F>(&mut self, encode: F, fire_update: bool)
    where
        F: FnOnce(&Self) -> Option<Element>,
    {
        let backlog = self.dirty;
        self.mark_dirty(fire_update);
        if !self.save_allowed {
            return;
        }
        if backlog {
            if let Err(err) = self.flush() {
                error!(?err, "unable to save user preferences");
            }
            return;
        }
        if let Some(fragment) = encode(self) {
            trace!(element = fragment.name(), "saving preferences section");
            if let Err(err) = self.store.save_fragments(std::slice::from_ref(&fragment)) {
                error!(?err, element = fragment.name(), "unable to save user preferences");
                return;
            }
        }
        self.dirty = false;
    }

    fn save_class_preferences(&mut self) {
        self.save_section(|r| fragments::encode_class_preferences(&r.classes), true);
    }

    fn save_windows(&mut self) {
        self.save_section(|r| fragments::encode_windows(&r.windows), false);
    }

    /// Serializable view of all persisted sections.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            settings: &self.simple,
            combo_boxes: &self.combo_boxes,
            check_boxes: &self.check_boxes,
            classes: &self.classes,
            windows: &self.windows,
        }
    }

    /// Pretty JSON rendering of [`Self::snapshot`].
    pub fn snapshot_json(&self) -> Result<String, PrefsError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    // ── Simple settings and session suppression ──────────────────────

    /// Turn a simple setting on (stored) or off (removed).
    pub fn set_simple_preference_state(&mut self, name: &str, state: bool) {
        if state {
            self.simple.insert(name.to_owned());
        } else {
            self.simple.remove(name);
        }
        self.save_section(|r| Some(fragments::encode_settings(&r.simple)), false);
    }

    /// Whether a simple setting is on.
    pub fn simple_preference_state(&self, name: &str) -> bool {
        self.simple.contains(name)
    }

    /// Names of all simple settings that are on.
    pub fn simple_preference_state_list(&self) -> Vec<String> {
        self.simple.iter().cloned().collect()
    }

    /// Suppress (or un-suppress) a message for this session only. Never persisted.
    pub fn set_session_preference_state(&mut self, name: &str, state: bool) {
        if state {
            self.session.insert(name.to_owned());
        } else {
            self.session.remove(name);
        }
    }

    /// Whether a message is suppressed for this session.
    pub fn session_preference_state(&self, name: &str) -> bool {
        self.session.contains(name)
    }

    // ── Combo and check boxes ────────────────────────────────────────

    /// Remember the last selection of a combo box. Blank values are kept in
    /// memory but not persisted.
    pub fn set_combo_box_last_selection(&mut self, name: &str, value: &str) {
        self.combo_boxes.insert(name.to_owned(), value.to_owned());
        self.save_section(|r| fragments::encode_combo_boxes(&r.combo_boxes), false);
    }

    /// Last selection of a combo box.
    pub fn combo_box_last_selection(&self, name: &str) -> Option<&str> {
        self.combo_boxes.get(name).map(String::as_str)
    }

    /// Remember the last state of a check box.
    pub fn set_checkbox_preference_state(&mut self, name: &str, state: bool) {
        self.check_boxes.insert(name.to_owned(), state);
        self.save_section(|r| fragments::encode_check_boxes(&r.check_boxes), false);
    }

    /// Last state of a check box, or `default` when never set.
    pub fn checkbox_preference_state(&self, name: &str, default: bool) -> bool {
        self.check_boxes.get(name).copied().unwrap_or(default)
    }

    // ── Providers ────────────────────────────────────────────────────

    /// Register the provider for its class. A class that already has a
    /// record is described immediately.
    pub fn register_provider(&mut self, provider: Arc<dyn PreferenceProvider>) {
        let class = provider.class_id();
        debug!(class = %class, "registering preference provider");
        let known = self.classes.contains_key(&class);
        self.providers.insert(class.clone(), provider);
        if known {
            self.set_class_description(&class);
        }
    }

    /// Ask the class's provider for its description and declarations. Without
    /// a registered provider the class simply stays undescribed.
    pub fn set_class_description(&mut self, class: &ClassId) {
        let Some(provider) = self.providers.get(class).map(Arc::clone) else {
            warn!(class = %class, "no preference provider registered, perhaps an expected plugin is missing?");
            return;
        };
        if let Some(description) = provider.describe() {
            self.classes.entry(class.clone()).or_default().description = Some(description);
        }
        let mut sink = ChoiceSink::default();
        provider.register_choices(&mut sink);
        for declaration in sink.into_declarations() {
            match declaration {
                Declaration::Reminder { item, description } => {
                    self.set_preference_item_details(class, &item, &description);
                }
                Declaration::Choice {
                    item,
                    description,
                    options,
                    default,
                } => self.set_message_item_details(class, &item, &description, options, default),
            }
        }
    }

    /// Description of a class, empty when unknown.
    pub fn class_description(&self, class: &ClassId) -> &str {
        self.classes
            .get(class)
            .and_then(|c| c.description.as_deref())
            .unwrap_or_default()
    }

    /// Classes that have a preference record.
    pub fn preferences_classes(&self) -> Vec<ClassId> {
        self.classes.keys().cloned().collect()
    }

    /// Full record for a class.
    pub fn class_preferences(&self, class: &ClassId) -> Option<&ClassPreferences> {
        self.classes.get(class)
    }

    /// Reminders plus multiple choices of a class.
    pub fn preferences_size(&self, class: &ClassId) -> usize {
        self.classes.get(class).map_or(0, ClassPreferences::len)
    }

    fn canonical(&self, class: &ClassId) -> ClassId {
        self.options
            .class_aliases
            .get(class)
            .unwrap_or(class)
            .clone()
    }

    fn ensure_described(&mut self, class: &ClassId) {
        if !self.classes.contains_key(class) {
            self.classes.insert(class.clone(), ClassPreferences::default());
            self.set_class_description(class);
        }
    }

    // ── Reminders ────────────────────────────────────────────────────

    /// Switch a reminder on (do not remind again) or off.
    pub fn set_preference_state(&mut self, class: &ClassId, item: &str, state: bool) {
        let class = self.canonical(class);
        self.ensure_described(&class);
        let record = self.classes.entry(class).or_default();
        match record.reminder_mut(item) {
            Some(reminder) => reminder.state = state,
            None => record.reminders.push(Reminder::new(item, state)),
        }
        self.display_remember_message();
        self.save_class_preferences();
    }

    /// Reminder state; false until explicitly set.
    pub fn preference_state(&self, class: &ClassId, item: &str) -> bool {
        self.classes
            .get(&self.canonical(class))
            .and_then(|c| c.reminder(item))
            .is_some_and(|r| r.state)
    }

    /// Create or update a reminder's description. Not persisted.
    pub fn set_preference_item_details(&mut self, class: &ClassId, item: &str, description: &str) {
        let record = self.classes.entry(class.clone()).or_default();
        match record.reminder_mut(item) {
            Some(reminder) => description.clone_into(&mut reminder.description),
            None => {
                let mut reminder = Reminder::new(item, false);
                description.clone_into(&mut reminder.description);
                record.reminders.push(reminder);
            }
        }
    }

    /// Reminder item keys of a class in registration order.
    pub fn preference_list(&self, class: &ClassId) -> Vec<String> {
        self.classes
            .get(class)
            .map(|c| c.reminders.iter().map(|r| r.item.clone()).collect())
            .unwrap_or_default()
    }

    /// Reminder item key at `index`.
    pub fn preference_item_name(&self, class: &ClassId, index: usize) -> Option<&str> {
        self.classes
            .get(class)
            .and_then(|c| c.reminders.get(index))
            .map(|r| r.item.as_str())
    }

    /// Reminder description.
    pub fn preference_item_description(&self, class: &ClassId, item: &str) -> Option<&str> {
        self.classes
            .get(class)
            .and_then(|c| c.reminder(item))
            .map(|r| r.description.as_str())
    }

    // ── Multiple choices ─────────────────────────────────────────────

    /// Create or update a multiple choice's description, options and default.
    pub fn set_message_item_details(
        &mut self,
        class: &ClassId,
        item: &str,
        description: &str,
        options: BTreeMap<i32, String>,
        default: i32,
    ) {
        let record = self.classes.entry(class.clone()).or_default();
        match record.choice_mut(item) {
            Some(choice) => choice.set_details(description.to_owned(), options, default),
            None => record.choices.push(MultipleChoice::described(
                item,
                description.to_owned(),
                options,
                default,
            )),
        }
    }

    /// Select option `value` for a choice, creating the choice if needed.
    pub fn set_multiple_choice_option(&mut self, class: &ClassId, item: &str, value: i32) {
        self.ensure_described(class);
        let record = self.classes.entry(class.clone()).or_default();
        match record.choice_mut(item) {
            Some(choice) => choice.set_value(value),
            None => record.choices.push(MultipleChoice::with_value(item, value)),
        }
        self.display_remember_message();
        self.save_class_preferences();
    }

    /// Select the option whose label is `label`.
    pub fn set_multiple_choice_option_by_label(&mut self, class: &ClassId, item: &str, label: &str) {
        let record = self.classes.entry(class.clone()).or_default();
        let matched = record.choice_mut(item).is_some_and(|c| c.select_label(label));
        if !matched {
            debug!(class = %class, item, label, "no multiple choice option with that label");
        }
        self.save_class_preferences();
    }

    /// Option table of a choice; empty when unknown.
    pub fn choice_options(&self, class: &ClassId, item: &str) -> BTreeMap<i32, String> {
        self.choice(class, item)
            .map(|c| c.options().clone())
            .unwrap_or_default()
    }

    /// Number of multiple choices of a class.
    pub fn multiple_choice_size(&self, class: &ClassId) -> usize {
        self.classes.get(class).map_or(0, |c| c.choices.len())
    }

    /// Choice item keys of a class in registration order.
    pub fn multiple_choice_list(&self, class: &ClassId) -> Vec<String> {
        self.classes
            .get(class)
            .map(|c| c.choices.iter().map(|m| m.item().to_owned()).collect())
            .unwrap_or_default()
    }

    /// Choice item key at `index`.
    pub fn choice_name(&self, class: &ClassId, index: usize) -> Option<&str> {
        self.classes
            .get(class)
            .and_then(|c| c.choices.get(index))
            .map(MultipleChoice::item)
    }

    /// Choice description.
    pub fn choice_description(&self, class: &ClassId, item: &str) -> Option<&str> {
        self.choice(class, item).map(MultipleChoice::description)
    }

    /// Selected option of a choice; 0 when unknown.
    pub fn multiple_choice_option(&self, class: &ClassId, item: &str) -> i32 {
        self.choice(class, item).map_or(0, MultipleChoice::value)
    }

    /// Default option of a choice; 0 when unknown.
    pub fn multiple_choice_default_option(&self, class: &ClassId, item: &str) -> i32 {
        self.choice(class, item).map_or(0, MultipleChoice::default_value)
    }

    fn choice(&self, class: &ClassId, item: &str) -> Option<&MultipleChoice> {
        self.classes.get(class).and_then(|c| c.choice(item))
    }

    // ── Windows ──────────────────────────────────────────────────────

    fn window_mut(&mut self, class: &ClassId) -> Option<&mut WindowDetails> {
        if self.options.ignored_window_classes.contains(class) {
            return None;
        }
        Some(self.windows.entry(class.clone()).or_default())
    }

    /// Remember a window's location; turns location saving on.
    pub fn set_window_location(&mut self, class: &ClassId, location: Point) {
        let Some(window) = self.window_mut(class) else {
            return;
        };
        window.set_location(location);
        self.save_windows();
    }

    /// Remember a window's size; turns size saving on.
    pub fn set_window_size(&mut self, class: &ClassId, size: Size) {
        let Some(window) = self.window_mut(class) else {
            return;
        };
        window.set_size(size);
        self.save_windows();
    }

    /// Choose whether a window's location is persisted.
    pub fn set_save_window_location(&mut self, class: &ClassId, save: bool) {
        let Some(window) = self.window_mut(class) else {
            return;
        };
        window.set_save_location(save);
        self.save_windows();
    }

    /// Choose whether a window's size is persisted.
    pub fn set_save_window_size(&mut self, class: &ClassId, save: bool) {
        let Some(window) = self.window_mut(class) else {
            return;
        };
        window.set_save_size(save);
        self.save_windows();
    }

    /// Set (or, with `None`, remove) a window property.
    pub fn set_property(&mut self, class: &ClassId, key: &str, value: Option<PropertyValue>) {
        let Some(window) = self.window_mut(class) else {
            return;
        };
        window.set_property(key, value);
        self.save_windows();
    }

    /// Stored location of a window.
    pub fn window_location(&self, class: &ClassId) -> Option<Point> {
        self.windows.get(class).map(WindowDetails::location)
    }

    /// Stored size of a window.
    pub fn window_size(&self, class: &ClassId) -> Option<Size> {
        self.windows.get(class).map(WindowDetails::size)
    }

    /// Whether a window's location is persisted; false when unknown.
    pub fn save_window_location(&self, class: &ClassId) -> bool {
        self.windows.get(class).is_some_and(WindowDetails::save_location)
    }

    /// Whether a window's size is persisted; false when unknown.
    pub fn save_window_size(&self, class: &ClassId) -> bool {
        self.windows.get(class).is_some_and(WindowDetails::save_size)
    }

    /// Window classes with stored details.
    pub fn window_list(&self) -> Vec<ClassId> {
        self.windows.keys().cloned().collect()
    }

    /// Full record for a window class.
    pub fn window_details(&self, class: &ClassId) -> Option<&WindowDetails> {
        self.windows.get(class)
    }

    /// A window property.
    pub fn property(&self, class: &ClassId, key: &str) -> Option<&PropertyValue> {
        self.windows.get(class).and_then(|w| w.properties().get(key))
    }

    /// Keys of a window's properties.
    pub fn property_keys(&self, class: &ClassId) -> Vec<&str> {
        self.windows
            .get(class)
            .map(|w| w.properties().keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether any details are stored for a window class.
    pub fn has_properties(&self, class: &ClassId) -> bool {
        self.windows.contains_key(class)
    }

    // ── Messages ─────────────────────────────────────────────────────

    /// Show a message unless it is suppressed for the session or its
    /// reminder is set, then record the skip options the user chose.
    pub fn show_message(&mut self, request: &MessageRequest<'_>) {
        let key = request.session_key();
        if self.session_preference_state(&key) || self.preference_state(request.class, request.item) {
            return;
        }
        let Some(prompter) = self.prompter.as_mut() else {
            debug!(key = %key, "no message prompter attached");
            return;
        };
        let response = prompter.prompt(&Prompt {
            kind: request.kind,
            title: request.title,
            text: request.text,
            offer_session_skip: request.session_only,
            offer_future_skip: request.always_remember,
        });
        if request.always_remember && response.skip_future {
            self.set_preference_state(request.class, request.item, true);
        }
        if request.session_only && response.skip_session {
            self.set_session_preference_state(&key, true);
        }
    }

    /// Show an informational message offering "skip in future".
    pub fn show_info_message(&mut self, title: &str, text: &str, class: &ClassId, item: &str) {
        self.show_message(&MessageRequest::new(MessageKind::Info, title, text, class, item));
    }

    /// Show a warning offering "skip in future".
    pub fn show_warning_message(&mut self, title: &str, text: &str, class: &ClassId, item: &str) {
        self.show_message(&MessageRequest::new(MessageKind::Warning, title, text, class, item));
    }

    /// Show an error offering "skip in future".
    pub fn show_error_message(&mut self, title: &str, text: &str, class: &ClassId, item: &str) {
        self.show_message(&MessageRequest::new(MessageKind::Error, title, text, class, item));
    }

    /// Tell the user where a remembered answer can be reverted.
    fn display_remember_message(&mut self) {
        if self.loading {
            return;
        }
        let own = ClassId::new(REGISTRY_CLASS);
        self.show_info_message(
            "Reminder",
            "You can re-display this message or change this choice from Preferences > Messages.",
            &own,
            REMINDER_ITEM,
        );
    }
}
