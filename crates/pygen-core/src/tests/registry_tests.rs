use pygen_pyast::Expr;
use pygen_pyast::Stmt;

use crate::config::GeneratorConfig;
use crate::registry::ClassRegistry;
use crate::registry::RegistryError;

fn registry() -> ClassRegistry {
    ClassRegistry::new(&GeneratorConfig::default())
}

#[test]
fn enum_registration_is_one_shot() {
    let mut registry = registry();
    assert_eq!(registry.generate_enum("Color").unwrap(), "Color");
    let error = registry.generate_enum("Color").unwrap_err();
    assert!(matches!(error, RegistryError::AlreadyRegistered { .. }));
}

#[test]
fn referencing_an_ungenerated_enum_fails() {
    let mut registry = registry();
    let error = registry.reference_enum("Color").unwrap_err();
    assert!(matches!(error, RegistryError::NoEnumFound { .. }));
}

#[test]
fn registered_enums_resolve_to_their_class_name() {
    let mut registry = registry();
    registry.generate_enum("color").unwrap();
    assert_eq!(registry.reference_enum("color").unwrap(), Expr::name("Color"));
}

#[test]
fn forward_input_references_become_string_annotations() {
    let mut registry = registry();
    let expr = registry.reference_input("FriendInput", true).unwrap();
    assert_eq!(expr, Expr::string("FriendInput"));

    let rebuilds = registry.forward_ref_statements();
    assert_eq!(rebuilds.len(), 1);
    let Stmt::Expr(Expr::Call { func, .. }) = &rebuilds[0] else {
        panic!("expected a model_rebuild call");
    };
    assert_eq!(
        **func,
        Expr::attribute(Expr::name("FriendInput"), "model_rebuild"),
    );
}

#[test]
fn strict_input_references_fail_when_ungenerated() {
    let mut registry = registry();
    let error = registry.reference_input("FriendInput", false).unwrap_err();
    assert!(matches!(error, RegistryError::NoInputTypeFound { .. }));
}

#[test]
fn rebuild_statements_are_sorted_by_class_name() {
    let mut registry = registry();
    registry.reference_input("Zeta", true).unwrap();
    registry.reference_input("Alpha", true).unwrap();
    let names: Vec<_> = registry
        .forward_ref_statements()
        .iter()
        .map(|stmt| {
            let Stmt::Expr(Expr::Call { func, .. }) = stmt else {
                panic!("expected a call statement");
            };
            let Expr::Attribute { value, .. } = func.as_ref() else {
                panic!("expected an attribute call");
            };
            value.as_name().unwrap().to_string()
        })
        .collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
}

#[test]
fn builtin_scalars_map_to_python_primitives() {
    let mut registry = registry();
    assert_eq!(registry.reference_scalar("ID").unwrap(), Expr::name("str"));
    assert_eq!(registry.reference_scalar("Int").unwrap(), Expr::name("int"));
    assert_eq!(
        registry.reference_scalar("Boolean").unwrap(),
        Expr::name("bool"),
    );
}

#[test]
fn dotted_scalar_mappings_register_an_import() {
    let mut config = GeneratorConfig::default();
    config
        .scalar_definitions
        .insert("Datetime".to_string(), "datetime.datetime".to_string());
    let mut registry = ClassRegistry::new(&config);

    let expr = registry.reference_scalar("Datetime").unwrap();
    assert_eq!(expr, Expr::name("datetime"));
    assert!(registry.import_statements().contains(&Stmt::ImportFrom {
        module: "datetime".to_string(),
        names: vec!["datetime".to_string()],
    }));
}

#[test]
fn unmapped_scalars_fail() {
    let mut registry = registry();
    let error = registry.reference_scalar("Upload").unwrap_err();
    assert!(matches!(error, RegistryError::NoScalarFound { .. }));
}

#[test]
fn node_names_are_snake_cased_and_keyword_escaped() {
    let registry = registry();
    assert_eq!(registry.generate_node_name("createdAt"), "created_at");
    assert_eq!(registry.generate_node_name("from"), "from_");
}

#[test]
fn operation_names_are_capitalized() {
    let registry = registry();
    assert_eq!(registry.style_query_name("getUser"), "GetUser");
    assert_eq!(registry.style_mutation_name("createUser"), "CreateUser");
}

#[test]
fn operation_registration_is_one_shot_per_category() {
    let mut registry = registry();
    assert_eq!(registry.generate_query("getUser").unwrap(), "GetUser");
    let error = registry.generate_query("getUser").unwrap_err();
    assert!(matches!(
        error,
        RegistryError::AlreadyRegistered {
            category: "query",
            ..
        },
    ));

    // The categories are independent namespaces.
    registry.generate_mutation("getUser").unwrap();
    registry.generate_subscription("getUser").unwrap();
}

#[test]
fn selection_class_names_are_claimed_once() {
    let mut registry = registry();
    registry.generate_object("GetUserUser").unwrap();
    let error = registry.generate_object("GetUserUser").unwrap_err();
    assert!(matches!(
        error,
        RegistryError::AlreadyRegistered {
            category: "object",
            ..
        },
    ));
}
