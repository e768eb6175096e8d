use super::*;

fn descriptor(source: &str) -> TypeDescriptor {
    parse_identifier(source).expect("identifier should parse")
}

fn build_err(source: &str) -> ParseErrorKind {
    parse_identifier(source)
        .expect_err("identifier should be rejected")
        .kind
}

#[test]
fn splits_name_and_module_identity() {
    let desc = descriptor(
        "System.Int32, mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
    );
    assert_eq!(desc.name, "System.Int32");
    assert_eq!(
        desc.module,
        "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
    );
    assert_eq!(desc.module_name(), "mscorlib");
    assert!(!desc.is_generic());
}

#[test]
fn module_identity_whitespace_is_normalized() {
    let desc = descriptor("Foo ,  Game ,Version = 1.0,Culture=neutral");
    assert_eq!(desc.name, "Foo");
    assert_eq!(desc.module, "Game, Version=1.0, Culture=neutral");
}

#[test]
fn module_identity_is_optional() {
    let desc = descriptor("System.Int32");
    assert_eq!(desc.name, "System.Int32");
    assert!(desc.module.is_empty());
}

#[test]
fn worked_example_builds_outer_inner_int32() {
    let desc =
        descriptor("Outer`1[[Inner`1[[System.Int32, mscorlib]], MyAssembly]], MyAssembly");
    assert_eq!(desc.name, "Outer");
    assert_eq!(desc.module, "MyAssembly");
    assert_eq!(desc.arity(), 1);

    let inner = &desc.generic_arguments[0];
    assert_eq!(inner.name, "Inner");
    assert_eq!(inner.module, "MyAssembly");
    assert_eq!(inner.arity(), 1);

    let leaf = &inner.generic_arguments[0];
    assert_eq!(leaf.name, "System.Int32");
    assert_eq!(leaf.module, "mscorlib");
    assert!(!leaf.is_generic());
    assert_eq!(desc.node_count(), 3);
}

#[test]
fn generic_arguments_keep_positional_order() {
    let desc = descriptor("Dictionary`2[[Key, A],[Value`1[[Item, B]], A]], C");
    let names: Vec<&str> = desc
        .generic_arguments
        .iter()
        .map(|arg| arg.name.as_str())
        .collect();
    assert_eq!(names, ["Key", "Value"]);
    assert_eq!(desc.search_name(), "Dictionary`2");
    assert_eq!(desc.generic_arguments[1].search_name(), "Value`1");
    assert_eq!(desc.generic_arguments[0].search_name(), "Key");
}

#[test]
fn array_suffix_is_separated_from_name() {
    let desc = descriptor("Foo[,][], A");
    assert_eq!(desc.name, "Foo");
    assert_eq!(desc.array_suffix, "[,][]");
    assert_eq!(desc.array_ranks(), vec![2, 1]);
    assert_eq!(desc.search_name(), "Foo");

    let generic_array = descriptor("List`1[[Foo, A]][], B");
    assert_eq!(generic_array.name, "List");
    assert_eq!(generic_array.array_suffix, "[]");
    assert_eq!(generic_array.module, "B");
}

#[test]
fn empty_names_are_rejected() {
    assert_eq!(build_err(""), ParseErrorKind::EmptyTypeName);
    assert_eq!(build_err(", mscorlib"), ParseErrorKind::EmptyTypeName);
    assert_eq!(build_err("List`1[[]], A"), ParseErrorKind::EmptyTypeName);
}

#[test]
fn malformed_module_identity_is_rejected() {
    assert_eq!(build_err("Foo, "), ParseErrorKind::MalformedModuleIdentity);
    assert_eq!(build_err("Foo, Game, Version"), ParseErrorKind::MalformedModuleIdentity);
    assert_eq!(build_err("Foo, Version=1.0"), ParseErrorKind::MalformedModuleIdentity);
}

#[test]
fn text_after_argument_list_is_rejected() {
    let err = parse_identifier("List`1[[X, A]]Extra, B").expect_err("trailing text");
    assert_eq!(err.kind, ParseErrorKind::TrailingCharacters);
    assert_eq!(err.offset, 14);
    assert_eq!(build_err("List`1[[X, A]] Extra, B"), ParseErrorKind::TrailingCharacters);
}

#[test]
fn arity_section_after_module_identity_is_rejected() {
    let err = parse_identifier("Foo, Mod`1[[A, M]]").expect_err("arity after module");
    assert_eq!(err.kind, ParseErrorKind::MalformedName);
    assert_eq!(err.offset, 0);
    assert_eq!(
        build_err("Foo, Mod, Version=1.0`1[[A, M]]"),
        ParseErrorKind::MalformedName
    );
    assert_eq!(
        build_err("List`1[[Foo, Mod`1[[A, M]]]], B"),
        ParseErrorKind::MalformedName
    );
}

#[test]
fn names_with_spaces_are_rejected() {
    assert_eq!(build_err("My Type, A"), ParseErrorKind::MalformedName);
}

#[test]
fn set_identity_reports_changes() {
    let mut desc = TypeDescriptor::new("Old.Foo", "Game");
    assert!(!desc.set_identity("Old.Foo", "Game"));
    assert!(desc.set_identity("New.Foo", "Game"));
    assert_eq!(desc.name, "New.Foo");
}

#[test]
fn strip_arity_only_removes_numeric_markers() {
    assert_eq!(strip_arity("List`1"), "List");
    assert_eq!(strip_arity("Dictionary`12"), "Dictionary");
    assert_eq!(strip_arity("Odd`"), "Odd`");
    assert_eq!(strip_arity("Plain"), "Plain");
}

#[test]
fn descriptors_serialize_without_empty_fields() {
    let json = serde_json::to_value(descriptor("List`1[[X, A]], B")).expect("serialize");
    assert_eq!(json["name"], "List");
    assert_eq!(json["genericArguments"][0]["name"], "X");
    assert!(json.get("arraySuffix").is_none());
    assert!(json["genericArguments"][0].get("genericArguments").is_none());
}
