use super::*;

fn sample() -> (StaticUniverse, ModuleId, ModuleId, TypeId, TypeId) {
    let mut builder = StaticUniverse::builder();
    let core = builder.add_module("mscorlib, Version=4.0.0.0, Culture=neutral");
    let game = builder.add_module("Game");
    let list = builder.add_type(core, "System.Collections.Generic.List`1");
    let weapon = builder.add_type(game, "Combat.Weapon");
    builder.mark_moved_from(weapon, MovedFrom::namespace("Items").with_module("Legacy"));
    (builder.build(), core, game, list, weapon)
}

#[test]
fn modules_are_listed_in_registration_order() {
    let (universe, core, game, _, _) = sample();
    assert_eq!(universe.loaded_modules(), vec![core, game]);
    assert_eq!(universe.module_count(), 2);
    assert_eq!(universe.type_count(), 2);
}

#[test]
fn duplicate_registrations_return_existing_handles() {
    let mut builder = StaticUniverse::builder();
    let a = builder.add_module("A");
    assert_eq!(builder.add_module("A"), a);
    let foo = builder.add_type(a, "Foo");
    assert_eq!(builder.add_type(a, "Foo"), foo);
    let universe = builder.build();
    assert_eq!(universe.type_count(), 1);
    assert_eq!(universe.module_types(a), &[foo]);
}

#[test]
fn find_module_by_identity_and_by_name() {
    let (universe, core, game, _, _) = sample();
    assert_eq!(
        universe.find_module("mscorlib, Version=4.0.0.0, Culture=neutral"),
        Some(core)
    );
    assert_eq!(universe.find_module("mscorlib"), None);
    assert_eq!(universe.find_module_by_name("mscorlib"), Some(core));
    assert_eq!(universe.find_module_by_name("Game, Version=2.0"), Some(game));
    assert_eq!(universe.find_module_by_name("Missing"), None);
}

#[test]
fn get_type_honors_name_match() {
    let (universe, core, _, list, _) = sample();
    assert_eq!(
        universe.get_type(core, "System.Collections.Generic.List`1", NameMatch::Exact),
        Some(list)
    );
    assert_eq!(
        universe.get_type(core, "system.collections.generic.list`1", NameMatch::Exact),
        None
    );
    assert_eq!(
        universe.get_type(core, "system.collections.generic.list`1", NameMatch::IgnoreCase),
        Some(list)
    );
}

#[test]
fn type_metadata_is_exposed() {
    let (universe, _, game, _, weapon) = sample();
    assert_eq!(universe.type_name(weapon), Some("Combat.Weapon"));
    assert_eq!(universe.type_module(weapon), Some(game));
    assert_eq!(universe.lookup("Game", "Combat.Weapon"), Some(weapon));
    assert_eq!(universe.type_name(TypeId(99)), None);
    assert_eq!(universe.module_identity(ModuleId(99)), None);
}

#[test]
fn moved_from_markers_are_discoverable() {
    let (universe, _, _, list, weapon) = sample();
    assert_eq!(universe.types_with_marker(MarkerKind::MovedFrom), vec![weapon]);
    let marker = universe.moved_from(weapon).expect("marker");
    assert_eq!(marker.namespace.as_deref(), Some("Items"));
    assert_eq!(marker.module.as_deref(), Some("Legacy"));
    assert_eq!(marker.class_name, None);
    assert!(universe.moved_from(list).is_none());
}

#[test]
fn name_match_compares_ascii_case_insensitively() {
    assert!(NameMatch::Exact.matches("Foo", "Foo"));
    assert!(!NameMatch::Exact.matches("Foo", "foo"));
    assert!(NameMatch::IgnoreCase.matches("Foo", "fOO"));
    assert_eq!(NameMatch::default(), NameMatch::Exact);
}
