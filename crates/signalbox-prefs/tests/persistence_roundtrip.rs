// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use signalbox_prefs::{
    ChoiceSink, ClassId, Document, FragmentStore, MemoryStore, Point, PreferenceProvider,
    PreferenceRegistry, PrefsEvent, PropertyValue, Size,
};
use std::sync::Arc;

const TURNOUTS: &str = "signalbox.tables.TurnoutTable";

struct TurnoutTablePrefs;

impl PreferenceProvider for TurnoutTablePrefs {
    fn class_id(&self) -> ClassId {
        ClassId::new(TURNOUTS)
    }

    fn describe(&self) -> Option<String> {
        Some("Turnout Table".to_owned())
    }

    fn register_choices(&self, sink: &mut ChoiceSink) {
        sink.reminder("remindSaveTurnouts", "Remind to save turnouts")
            .choice(
                "deleteInUse",
                "When deleting a turnout in use",
                [(0, "Ask"), (1, "Never delete"), (2, "Always delete")],
                0,
            );
    }
}

fn populated() -> PreferenceRegistry<MemoryStore> {
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.register_provider(Arc::new(TurnoutTablePrefs));
    let turnouts = ClassId::new(TURNOUTS);
    let editor = ClassId::new("signalbox.operations.YardEditFrame");

    registry.set_simple_preference_state("signalbox.panel.ShowGrid", true);
    registry.set_session_preference_state("signalbox.session.Only", true);
    registry.set_combo_box_last_selection("throttle.speedSteps", "128");
    registry.set_checkbox_preference_state("panel.autosave", false);
    registry.set_preference_state(&turnouts, "remindSaveTurnouts", true);
    registry.set_multiple_choice_option(&turnouts, "deleteInUse", 2);
    registry.set_window_location(&editor, Point::new(-5, 120));
    registry.set_window_size(&editor, Size::new(1024, 768));
    registry.set_property(&editor, "showHidden", Some(PropertyValue::Bool(true)));
    registry.set_property(&editor, "zoom", Some(PropertyValue::Float(1.5)));
    registry.set_property(&editor, "title", Some(PropertyValue::Text("Yard <east>".into())));
    registry.set_property(&editor, "heading", Some(PropertyValue::Text("  Yard east  ".into())));
    registry.set_property(&editor, "blank", Some(PropertyValue::Text("   ".into())));
    registry.set_simple_preference_state(" padded.setting ", true);
    registry
}

fn reload(document: Document) -> PreferenceRegistry<MemoryStore> {
    let mut registry = PreferenceRegistry::new(MemoryStore::from_document(document));
    registry.register_provider(Arc::new(TurnoutTablePrefs));
    registry.load().expect("load from memory store");
    registry
}

#[test]
fn written_document_loads_into_equal_state() {
    let original = populated();
    let xml = original.store().document().to_xml().expect("serialize");
    let restored = reload(Document::parse(&xml).expect("parse"));

    let turnouts = ClassId::new(TURNOUTS);
    let editor = ClassId::new("signalbox.operations.YardEditFrame");

    assert!(restored.simple_preference_state("signalbox.panel.ShowGrid"));
    assert!(!restored.session_preference_state("signalbox.session.Only"));
    assert_eq!(restored.combo_box_last_selection("throttle.speedSteps"), Some("128"));
    assert!(!restored.checkbox_preference_state("panel.autosave", true));

    assert!(restored.preference_state(&turnouts, "remindSaveTurnouts"));
    assert_eq!(restored.multiple_choice_option(&turnouts, "deleteInUse"), 2);
    assert_eq!(restored.multiple_choice_default_option(&turnouts, "deleteInUse"), 0);
    assert_eq!(restored.class_description(&turnouts), "Turnout Table");
    assert_eq!(
        restored.choice_options(&turnouts, "deleteInUse").get(&2).map(String::as_str),
        Some("Always delete")
    );

    assert_eq!(restored.window_location(&editor), Some(Point::new(-5, 120)));
    assert_eq!(restored.window_size(&editor), Some(Size::new(1024, 768)));
    assert!(restored.save_window_location(&editor));
    assert_eq!(restored.property(&editor, "showHidden"), Some(&PropertyValue::Bool(true)));
    assert_eq!(restored.property(&editor, "zoom"), Some(&PropertyValue::Float(1.5)));
    assert_eq!(
        restored.property(&editor, "title"),
        Some(&PropertyValue::Text("Yard <east>".into()))
    );
    assert_eq!(
        restored.property(&editor, "heading"),
        Some(&PropertyValue::Text("  Yard east  ".into()))
    );
    assert_eq!(restored.property(&editor, "blank"), Some(&PropertyValue::Text("   ".into())));
    assert!(restored.simple_preference_state(" padded.setting "));

    assert_eq!(
        original.snapshot_json().expect("json"),
        restored.snapshot_json().expect("json")
    );
}

#[test]
fn load_does_not_write_back() {
    let document = populated().into_inner().document().clone();
    let restored = reload(document);
    assert_eq!(restored.store().writes(), 0);
    assert!(!restored.is_dirty());
    assert!(!restored.is_loading());
    assert!(restored.is_save_allowed());
}

#[test]
fn load_flushes_changes_pending_from_before() {
    let document = populated().into_inner().document().clone();
    let mut registry = PreferenceRegistry::new(MemoryStore::from_document(document));
    registry.set_save_allowed(false);
    registry.set_simple_preference_state("pending.before.load", true);
    let events = registry.subscribe();

    registry.load().expect("load");
    assert_eq!(registry.store().writes(), 1);
    assert!(registry.simple_preference_state("pending.before.load"));
    assert!(registry.simple_preference_state("signalbox.panel.ShowGrid"));
    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![PrefsEvent::SaveAllowedChanged { old: false, new: true }]
    );
}

#[test]
fn provider_registered_after_load_describes_known_class() {
    let document = populated().into_inner().document().clone();
    let mut registry = PreferenceRegistry::new(MemoryStore::from_document(document));
    registry.load().expect("load");

    let turnouts = ClassId::new(TURNOUTS);
    assert_eq!(registry.class_description(&turnouts), "");
    assert!(registry.choice_options(&turnouts, "deleteInUse").is_empty());
    assert_eq!(registry.multiple_choice_option(&turnouts, "deleteInUse"), 2);

    registry.register_provider(Arc::new(TurnoutTablePrefs));
    assert_eq!(registry.class_description(&turnouts), "Turnout Table");
    assert_eq!(registry.choice_options(&turnouts, "deleteInUse").len(), 3);
    assert_eq!(registry.multiple_choice_option(&turnouts, "deleteInUse"), 2);
    assert_eq!(registry.preferences_size(&turnouts), 2);
}

#[test]
fn malformed_fragments_leave_defaults() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<auxiliary-configuration xmlns="http://www.netbeans.org/ns/auxiliary-configuration/1">
  <windowDetails xmlns="http://jmri.org/xml/schema/auxiliary-configuration/window-details-4-3-5.xsd">
    <window class="a.Frame" locX="left" locY="10" width="300.0" height="200.0"/>
  </windowDetails>
  <classPreferences xmlns="http://jmri.org/xml/schema/auxiliary-configuration/class-preferences-4-3-5.xsd">
    <preferences class="a.Table">
      <multipleChoice><option item="x" value="lots"/></multipleChoice>
      <reminderPrompts><reminder>remindMe</reminder></reminderPrompts>
    </preferences>
  </classPreferences>
</auxiliary-configuration>"#;
    let mut registry =
        PreferenceRegistry::new(MemoryStore::from_document(Document::parse(xml).expect("parse")));
    registry.load().expect("load");

    let frame = ClassId::new("a.Frame");
    let table = ClassId::new("a.Table");
    assert_eq!(registry.window_size(&frame), Some(Size::new(300, 200)));
    assert_eq!(registry.window_location(&frame), Some(Point::default()));
    assert!(!registry.save_window_location(&frame));
    assert_eq!(registry.multiple_choice_size(&table), 0);
    assert!(registry.preference_state(&table, "remindMe"));
}

#[test]
fn memory_store_replaces_fragments() {
    let mut store = MemoryStore::new();
    let root = signalbox_prefs::fragments::SETTINGS.root();
    store.save_fragments(&[root.clone(), root.clone()]).expect("save");
    assert_eq!(store.writes(), 1);
    assert_eq!(store.document().fragments().len(), 1);
    assert!(store
        .load_fragment(root.name(), signalbox_prefs::fragments::SETTINGS.namespace)
        .expect("load")
        .is_some());
}
