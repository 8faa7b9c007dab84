// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use signalbox_prefs::fragments::{SETTINGS, WINDOWS};
use signalbox_prefs::{ClassId, FragmentStore, PreferenceRegistry, PropertyValue, Size};
use signalbox_prefs_fs::{FsFragmentStore, FILE_NAME};
use std::fs;

#[test]
fn registry_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let class = ClassId::new("signalbox.throttle.ThrottleWindow");

    let mut first = PreferenceRegistry::new(FsFragmentStore::for_profile(dir.path(), None));
    first.set_simple_preference_state("showToolTips", true);
    first.set_window_size(&class, Size::new(640, 480));
    first.set_property(&class, "speedStep", Some(PropertyValue::Int(128)));
    first.set_checkbox_preference_state("hideInactive", true);

    let written = fs::read_to_string(dir.path().join(FILE_NAME)).unwrap();
    assert!(written.contains("<auxiliary-configuration"));
    assert!(written.contains("showToolTips"));

    let mut second = PreferenceRegistry::new(FsFragmentStore::for_profile(dir.path(), None));
    second.load().unwrap();
    assert!(second.simple_preference_state("showToolTips"));
    assert_eq!(second.window_size(&class), Some(Size::new(640, 480)));
    assert!(second.save_window_size(&class));
    assert!(!second.save_window_location(&class));
    assert_eq!(second.property(&class, "speedStep"), Some(&PropertyValue::Int(128)));
    assert!(second.checkbox_preference_state("hideInactive", false));
}

#[test]
fn node_specific_copy_wins_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let node_dir = dir.path().join("profile").join("shed-pi");
    fs::create_dir_all(&node_dir).unwrap();
    fs::write(
        node_dir.join(FILE_NAME),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<auxiliary-configuration/>\n",
    )
    .unwrap();

    let store = FsFragmentStore::for_profile(dir.path(), Some("shed-pi"));
    assert_eq!(store.path(), node_dir.join(FILE_NAME));

    let other = FsFragmentStore::for_profile(dir.path(), Some("office"));
    assert_eq!(other.path(), dir.path().join(FILE_NAME));
}

#[test]
fn saving_replaces_only_matching_fragment() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FsFragmentStore::at(dir.path().join("nested").join(FILE_NAME));

    store.save_fragments(&[SETTINGS.root(), WINDOWS.root()]).unwrap();
    let mut settings = SETTINGS.root();
    settings.push(signalbox_prefs::Element::new("setting").with_text("a"));
    store.save_fragments(&[settings]).unwrap();

    let document = store.read_document().unwrap();
    assert_eq!(document.fragments().len(), 2);
    let stored = store
        .load_fragment(SETTINGS.element, SETTINGS.namespace)
        .unwrap()
        .unwrap();
    assert_eq!(stored.child("setting").and_then(|s| s.text()), Some("a"));
    assert!(!dir.path().join("nested").join("user-interface.xml.tmp").exists());
}

#[test]
fn unreadable_document_is_reported_by_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(FILE_NAME), "<auxiliary-configuration><settings>").unwrap();
    let mut registry = PreferenceRegistry::new(FsFragmentStore::for_profile(dir.path(), None));
    assert!(registry.load().is_err());
    assert!(registry.is_save_allowed());
}
