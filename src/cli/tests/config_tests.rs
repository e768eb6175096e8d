use super::config::{TypeManifest, UniverseManifest, load_manifest, load_universe, parse_manifest};
use std::io::Write;
use typeheal_resolver::{OnMiss, ResolveOptions, TypeUniverse};

const MANIFEST: &str = r#"{
  "modules": [
    {
      "identity": "Game, Version=2.0.0.0",
      "types": [
        "Combat.Weapon",
        { "name": "New.Foo", "movedFrom": { "namespace": "Old" } },
        { "name": "Inventory.Bag`1", "movedFrom": { "className": "Sack", "module": "Legacy" } }
      ]
    },
    { "identity": "Tools", "types": ["Editor.Gizmo"] }
  ],
  "renames": [
    { "from": "Legacy.Thing", "fromModule": "Legacy", "module": "Game, Version=2.0.0.0", "name": "Combat.Weapon" }
  ]
}"#;

fn write_manifest(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write manifest");
    file
}

#[test]
fn manifest_accepts_plain_and_declared_types() {
    let manifest = parse_manifest(MANIFEST).expect("manifest");
    assert_eq!(manifest.modules.len(), 2);
    let types = &manifest.modules[0].types;
    assert!(matches!(&types[0], TypeManifest::Name(name) if name == "Combat.Weapon"));
    assert_eq!(types[1].name(), "New.Foo");
    let marker = types[2].moved_from().expect("marker");
    assert_eq!(marker.class_name.as_deref(), Some("Sack"));
    assert_eq!(marker.module.as_deref(), Some("Legacy"));
    assert_eq!(manifest.renames[0].from_module.as_deref(), Some("Legacy"));
}

#[test]
fn built_universe_contains_every_type() {
    let loaded = parse_manifest(MANIFEST).and_then(|m| m.build()).expect("build");
    assert_eq!(loaded.universe.module_count(), 2);
    assert_eq!(loaded.universe.type_count(), 4);
    assert!(loaded.universe.lookup("Tools", "Editor.Gizmo").is_some());
    assert_eq!(loaded.renames.len(), 2);
}

#[test]
fn engine_from_manifest_heals_markers_and_renames() {
    let loaded = parse_manifest(MANIFEST).and_then(|m| m.build()).expect("build");
    let engine = loaded.engine(ResolveOptions::default());

    let moved = engine
        .parse_and_resolve("Old.Foo, Game, Version=1.0.0.0", OnMiss::Fail)
        .expect("marker");
    assert_eq!(moved.canonical, "New.Foo, Game, Version=2.0.0.0");

    let renamed = engine
        .parse_and_resolve("Legacy.Thing, Legacy", OnMiss::Fail)
        .expect("rename");
    assert_eq!(renamed.canonical, "Combat.Weapon, Game, Version=2.0.0.0");

    let generic = engine
        .parse_and_resolve("Inventory.Sack`1[[Editor.Gizmo, Tools]], Legacy", OnMiss::Fail)
        .expect("generic marker");
    assert_eq!(
        generic.canonical,
        "Inventory.Bag`1[[Editor.Gizmo, Tools]], Game, Version=2.0.0.0"
    );
}

#[test]
fn renames_come_before_markers() {
    let loaded = parse_manifest(MANIFEST).and_then(|m| m.build()).expect("build");
    assert_eq!(loaded.registry().names(), ["manifest-renames", "moved-from"]);

    let without_renames = UniverseManifest {
        renames: Vec::new(),
        ..parse_manifest(MANIFEST).expect("manifest")
    };
    let loaded = without_renames.build().expect("build");
    assert_eq!(loaded.registry().names(), ["moved-from"]);
}

#[test]
fn invalid_manifests_are_rejected() {
    let duplicate = r#"{ "modules": [ { "identity": "A" }, { "identity": "A" } ] }"#;
    let err = parse_manifest(duplicate).and_then(|m| m.build()).err().expect("duplicate");
    assert!(err.to_string().contains("declared more than once"));

    let empty = r#"{ "modules": [ { "identity": "  " } ] }"#;
    assert!(parse_manifest(empty).and_then(|m| m.build()).is_err());

    let dangling = r#"{
      "modules": [ { "identity": "A", "types": ["Foo"] } ],
      "renames": [ { "from": "Old", "module": "A", "name": "Bar" } ]
    }"#;
    let err = parse_manifest(dangling).and_then(|m| m.build()).err().expect("dangling");
    assert!(err.to_string().contains("unknown type 'Bar'"));

    assert!(parse_manifest("{ not json").is_err());
}

#[test]
fn manifests_load_from_disk() {
    let file = write_manifest(MANIFEST);
    let manifest = load_manifest(file.path()).expect("load");
    assert_eq!(manifest.modules.len(), 2);

    let loaded = load_universe(file.path()).expect("universe");
    assert!(loaded.universe.find_module("Tools").is_some());
}

#[test]
fn missing_manifest_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = load_manifest(&path).err().expect("missing file");
    assert!(format!("{err:#}").contains("absent.json"));
}
