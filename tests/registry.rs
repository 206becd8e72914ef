mod common;

use suggestion_loader::inspector::FieldInspector;
use suggestion_loader::registry::{TypeDescriptor, TypeKind, TypeProvider, TypeRegistry, short_name};
use suggestion_loader::settings::LoaderSettings;

use common::{archive, order_type};

#[test]
fn bootstrap_types_are_ambient() {
    let registry = TypeRegistry::new();
    for name in ["java.lang.Object", "java.lang.String", "java.util.List", "java.math.BigInteger", "double"] {
        assert!(registry.resolve_by_name(name).expect("lookup").is_some(), "{}", name);
    }
    assert!(registry.resolve_by_name("com.acme.Order").expect("lookup").is_none());
    assert_eq!(registry.resource_count(), 0);
}

#[test]
fn first_definition_is_kept() {
    let mut registry = TypeRegistry::new();
    let before = registry.len();
    let (kept, previously_kept) = registry.define(TypeDescriptor::new("com.acme.Order", TypeKind::Class));
    assert!(!previously_kept);
    assert_eq!(kept.short_name(), "Order");
    let (kept, previously_kept) = registry.define(
        TypeDescriptor::new("com.acme.Order", TypeKind::Interface),
    );
    assert!(previously_kept);
    assert_eq!(kept.kind(), TypeKind::Class);
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn archive_resources_are_decoded_on_lookup() {
    let mut registry = TypeRegistry::new();
    let expanded = archive("orders.tar", &[order_type()]).expand().expect("expand");
    assert_eq!(registry.load_from_archive(expanded), 1);
    assert_eq!(registry.resource_path("com.acme.Order"), "com/acme/Order.type.json");
    let order = registry
        .resolve_by_name("com.acme.Order")
        .expect("lookup")
        .expect("Order");
    assert_eq!(order.descriptor(), &order_type());
    registry.clear();
    assert!(registry.resolve_by_name("com.acme.Order").expect("lookup").is_none());
}

#[test]
fn classes_inherit_the_universal_base() {
    let class = TypeDescriptor::new("com.acme.Order", TypeKind::Class).extends("com.acme.Entity");
    assert_eq!(class.declared_supertypes(), ["com.acme.Entity"]);
    assert_eq!(class.supertypes(), ["com.acme.Entity", "java.lang.Object"]);
    let interface = TypeDescriptor::new("com.acme.Priced", TypeKind::Interface);
    assert!(interface.supertypes().is_empty());
    let base = TypeDescriptor::new("java.lang.Object", TypeKind::Class);
    assert!(base.supertypes().is_empty());
}

#[test]
fn descriptors_serialize_to_json() {
    let order = order_type();
    let json = order.to_json().expect("json");
    let decoded: TypeDescriptor = serde_json::from_slice(&json).expect("descriptor");
    assert_eq!(decoded, order);
    let value: serde_json::Value = serde_json::from_slice(&json).expect("value");
    assert_eq!(value["kind"], "class");
    assert_eq!(value["fields"][0]["type"], "java.math.BigDecimal");
}

#[test]
fn descriptors_read_with_defaults() {
    let descriptor: TypeDescriptor =
        serde_json::from_str(r#"{ "name": "com.acme.Tag", "fields": [ { "name": "label", "type": "java.lang.String" } ] }"#)
            .expect("descriptor");
    assert_eq!(descriptor.kind(), TypeKind::Class);
    assert_eq!(descriptor.fields()[0].type_name(), "java.lang.String");
    assert_eq!(short_name(descriptor.name()), "Tag");
    assert_eq!(short_name("Tag"), "Tag");
}

#[test]
fn inspector_keeps_the_most_derived_declaration() {
    let mut registry = TypeRegistry::new();
    registry.define(TypeDescriptor::new("com.acme.Entity", TypeKind::Class).field("id", "java.lang.String"));
    registry.define(
        TypeDescriptor::new("com.acme.Order", TypeKind::Class)
            .extends("com.acme.Entity")
            .field("id", "long")
            .field("shipper", "com.acme.Shipper"),
    );
    let settings = LoaderSettings::default();
    let order = registry.resolve_by_name("com.acme.Order").expect("lookup").expect("Order");
    let fields = FieldInspector::new(&registry, &settings).fields(&order).expect("fields");
    assert_eq!(fields.len(), 2);
    let id = fields.iter().find(|f| f.name() == "id").expect("id");
    assert_eq!(id.declared_type().map(|t| t.name()), Some("long"));
    let shipper = fields.iter().find(|f| f.name() == "shipper").expect("shipper");
    assert!(shipper.declared_type().is_none());
}
