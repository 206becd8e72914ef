use std::fs;

use suggestion_loader::loader::SuggestionLoader;
use suggestion_loader::settings::LoaderSettings;

#[test]
fn defaults_match_the_java_ambient_namespace() {
    let settings = LoaderSettings::default();
    assert_eq!(settings.default_namespace, "java.lang");
    assert_eq!(settings.primitive_types.len(), 8);
    assert!(settings.is_primitive("boolean"));
    assert!(!settings.is_primitive("String"));
    for member in ["class", "hashCode", "toString"] {
        assert!(settings.is_ignored_member(member));
    }
    assert_eq!(settings.type_resource_suffix, ".type.json");
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("suggestion-loader.toml"),
        "default_namespace = \"com.acme\"\nprimitive_types = [\"int\"]\n",
    )
    .expect("write settings");
    let name = dir.path().join("suggestion-loader");
    let settings = LoaderSettings::load(name.to_str().expect("utf-8 path")).expect("load");
    assert_eq!(settings.default_namespace, "com.acme");
    assert_eq!(settings.primitive_types, ["int"]);
    // untouched keys keep their defaults
    assert!(settings.is_ignored_member("hashCode"));
    assert_eq!(settings.type_resource_suffix, ".type.json");
}

#[test]
fn missing_settings_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let name = dir.path().join("absent");
    let settings = LoaderSettings::load(name.to_str().expect("utf-8 path")).expect("load");
    assert_eq!(settings.default_namespace, "java.lang");
}

#[test]
fn custom_ignored_members_are_hidden() {
    let settings = LoaderSettings {
        ignored_members: vec![String::from("class"), String::from("scale")],
        ..Default::default()
    };
    let mut loader = SuggestionLoader::with_settings(settings);
    let outcome = loader
        .build("import java.lang.Object;", &[], &[])
        .expect("build");
    // hashCode and toString are no longer noise
    let mut fields = outcome.model().fields_for("Object").expect("fields").to_vec();
    fields.sort();
    assert_eq!(fields, ["hashCode", "toString"]);
}
