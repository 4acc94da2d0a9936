use pygen_pyast::ClassDef;
use pygen_pyast::Expr;
use pygen_pyast::Stmt;

use crate::ast;
use crate::compile::GeneratedModule;
use crate::compile::generate;
use crate::config::GeneratorConfig;
use crate::errors::GenerateError;
use crate::registry::RegistryError;
use crate::schema::Schema;

fn compile(sdl: &str, document: &str) -> Result<GeneratedModule, GenerateError> {
    compile_with(sdl, document, &GeneratorConfig::default())
}

fn compile_with(
    sdl: &str,
    document: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedModule, GenerateError> {
    let schema = Schema::from_str(sdl).unwrap();
    let documents = vec![ast::query::parse(document).unwrap()];
    generate(&schema, &documents, config)
}

fn symbol_position(statements: &[Stmt], name: &str) -> usize {
    statements
        .iter()
        .position(|stmt| stmt.symbol_name() == Some(name))
        .unwrap_or_else(|| panic!("no symbol named {name}"))
}

fn class_named<'a>(statements: &'a [Stmt], name: &str) -> &'a ClassDef {
    statements
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::ClassDef(class_def) if class_def.name == name => Some(class_def),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no class named {name}"))
}

fn unwrap_stages(error: GenerateError) -> GenerateError {
    match error {
        GenerateError::Stage { source, .. } => unwrap_stages(*source),
        other => other,
    }
}

const APP_SDL: &str = "enum Role { ADMIN MEMBER }\n\
     input CreateUserInput { name: String! role: Role! }\n\
     type User { id: ID! name: String! role: Role! }\n\
     type Query { user(id: ID!): User }\n\
     type Mutation { createUser(input: CreateUserInput!): User! }";

const APP_DOCUMENT: &str = "fragment UserFields on User { id name role }\n\
     query GetUser($id: ID!) { user(id: $id) { ...UserFields } }\n\
     mutation CreateUser($input: CreateUserInput!) { createUser(input: $input) { ...UserFields } }";

#[test]
fn phases_emit_in_dependency_order() -> Result<(), GenerateError> {
    let module = compile(APP_SDL, APP_DOCUMENT)?;
    let body = &module.body;
    assert!(symbol_position(body, "Role") < symbol_position(body, "CreateUserInput"));
    assert!(symbol_position(body, "CreateUserInput") < symbol_position(body, "UserFields"));
    assert!(symbol_position(body, "UserFields") < symbol_position(body, "GetUser"));
    assert!(symbol_position(body, "GetUser") < symbol_position(body, "CreateUser"));
    Ok(())
}

#[test]
fn imports_cover_the_referenced_toolkit() -> Result<(), GenerateError> {
    let module = compile(APP_SDL, APP_DOCUMENT)?;
    assert!(module.imports.contains(&Stmt::ImportFrom {
        module: "enum".to_string(),
        names: vec!["Enum".to_string()],
    }));
    assert!(module.imports.contains(&Stmt::ImportFrom {
        module: "pydantic".to_string(),
        names: vec!["BaseModel".to_string(), "Field".to_string()],
    }));
    Ok(())
}

#[test]
fn unreferenced_enums_and_inputs_are_skipped() -> Result<(), GenerateError> {
    let module = compile(
        "enum Unused { A }\n\
         input UnusedInput { a: String }\n\
         type Query { ok: Boolean! }",
        "query Check { ok }",
    )?;
    assert!(
        !module
            .body
            .iter()
            .any(|stmt| matches!(stmt.symbol_name(), Some("Unused" | "UnusedInput"))),
    );
    Ok(())
}

#[test]
fn skipping_unreferenced_types_can_be_disabled() -> Result<(), GenerateError> {
    let mut config = GeneratorConfig::default();
    config.skip_unreferenced = false;
    let module = compile_with(
        "enum Unused { A }\n\
         type Query { ok: Boolean! }",
        "query Check { ok }",
        &config,
    )?;
    class_named(&module.body, "Unused");
    Ok(())
}

#[test]
fn referencing_a_skipped_enum_fails_loudly() {
    let error = compile(
        "enum _Internal { A }\n\
         type Query { state: _Internal! }",
        "query State { state }",
    )
    .unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::Registry(RegistryError::NoEnumFound { .. }),
    ));
}

#[test]
fn mutually_referencing_inputs_use_forward_references() -> Result<(), GenerateError> {
    let module = compile(
        "input AInput { b: BInput }\n\
         input BInput { a: AInput }\n\
         type Query { ok(a: AInput): Boolean! }",
        "query Check($a: AInput) { ok(a: $a) }",
    )?;

    // AInput is generated first, so its reference to BInput is deferred.
    let a_input = class_named(&module.body, "AInput");
    let Stmt::AnnAssign { annotation, .. } = &a_input.body[0] else {
        panic!("expected the b attribute");
    };
    assert_eq!(annotation, &Expr::optional(Expr::string("BInput")));

    // BInput resolves AInput directly; only BInput needs a rebuild.
    let b_input = class_named(&module.body, "BInput");
    let Stmt::AnnAssign { annotation, .. } = &b_input.body[0] else {
        panic!("expected the a attribute");
    };
    assert_eq!(annotation, &Expr::optional(Expr::name("AInput")));

    let last = module.body.last().unwrap();
    assert_eq!(
        last,
        &Stmt::Expr(Expr::call(
            Expr::attribute(Expr::name("BInput"), "model_rebuild"),
            vec![],
            vec![],
        )),
    );
    Ok(())
}

#[test]
fn self_referential_inputs_use_forward_references() -> Result<(), GenerateError> {
    let module = compile(
        "input FriendInput { name: String! friend: FriendInput }\n\
         type Query { ok(friend: FriendInput): Boolean! }",
        "query Check($friend: FriendInput) { ok(friend: $friend) }",
    )?;
    let input = class_named(&module.body, "FriendInput");
    let Stmt::AnnAssign { annotation, .. } = &input.body[1] else {
        panic!("expected the friend attribute");
    };
    assert_eq!(annotation, &Expr::optional(Expr::string("FriendInput")));
    Ok(())
}

#[test]
fn empty_document_sets_are_rejected() {
    let schema = Schema::from_str("type Query { ok: Boolean! }").unwrap();
    let error = generate(&schema, &[], &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(error, GenerateError::NoDocumentsFound));
}

#[test]
fn frozen_inputs_get_a_model_config_and_tuples() -> Result<(), GenerateError> {
    let mut config: GeneratorConfig = serde_json::from_str(
        r#"{
            "freeze": {
                "enabled": true,
                "kinds": ["input"],
                "convert_list_to_tuple": true
            }
        }"#,
    )
    .unwrap();
    config.skip_unreferenced = false;
    let module = compile_with(
        "input TagsInput { tags: [String!]! }\n\
         type Query { ok: Boolean! }",
        "query Check { ok }",
        &config,
    )?;

    let input = class_named(&module.body, "TagsInput");
    assert_eq!(input.body[0].symbol_name(), Some("model_config"));
    let Stmt::AnnAssign { annotation, .. } = &input.body[1] else {
        panic!("expected the tags attribute");
    };
    assert_eq!(annotation, &Expr::tuple_of(Expr::name("str")));
    Ok(())
}

#[test]
fn enum_additional_bases_sit_between_str_and_enum() -> Result<(), GenerateError> {
    let mut config = GeneratorConfig::default();
    config.additional_bases.insert(
        "Role".to_string(),
        vec!["app.mixins.LabeledEnum".to_string()],
    );
    let module = compile_with(
        "enum Role { ADMIN }\n\
         type Query { role: Role! }",
        "query GetRole { role }",
        &config,
    )?;
    let role = class_named(&module.body, "Role");
    assert_eq!(
        role.bases,
        vec![
            Expr::name("str"),
            Expr::name("LabeledEnum"),
            Expr::name("Enum"),
        ],
    );
    Ok(())
}

#[test]
fn additional_bases_extend_the_configured_stack() -> Result<(), GenerateError> {
    let mut config = GeneratorConfig::default();
    config
        .additional_bases
        .insert("User".to_string(), vec!["app.mixins.Timestamped".to_string()]);
    let module = compile_with(
        "type User { id: ID! }\n\
         type Query { user: User }",
        "query GetUser { user { id } }",
        &config,
    )?;
    let nested = class_named(&module.body, "GetUserUser");
    assert!(nested.bases.contains(&Expr::name("Timestamped")));
    assert!(module.imports.contains(&Stmt::ImportFrom {
        module: "app.mixins".to_string(),
        names: vec!["Timestamped".to_string()],
    }));
    Ok(())
}
