use pygen_pyast::ClassDef;
use pygen_pyast::Constant;
use pygen_pyast::Expr;
use pygen_pyast::KeywordArg;
use pygen_pyast::Stmt;

use crate::ast;
use crate::compile::GeneratedModule;
use crate::compile::generate;
use crate::config::GeneratorConfig;
use crate::errors::GenerateError;
use crate::registry::RegistryError;
use crate::schema::Schema;

const USER_SDL: &str = "type User { id: ID! name: String! createdAt: String }\n\
     type Query { user(id: ID!): User }";

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

fn class_named<'a>(statements: &'a [Stmt], name: &str) -> &'a ClassDef {
    statements
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::ClassDef(class_def) if class_def.name == name => Some(class_def),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no class named {name}"))
}

fn meta_document(operation: &ClassDef) -> &str {
    let meta = class_named(&operation.body, "Meta");
    let Stmt::Assign { value, .. } = &meta.body[0] else {
        panic!("expected the document assignment");
    };
    let Expr::Constant(Constant::Str(document)) = value else {
        panic!("expected a string document");
    };
    document
}

fn unwrap_stages(error: GenerateError) -> GenerateError {
    match error {
        GenerateError::Stage { source, .. } => unwrap_stages(*source),
        other => other,
    }
}

#[test]
fn operations_nest_arguments_and_meta_classes() -> Result<(), GenerateError> {
    let module = compile(USER_SDL, "query GetUser($id: ID!) { user(id: $id) { id } }")?;
    let operation = class_named(&module.body, "GetUser");

    let arguments = class_named(&operation.body, "Arguments");
    assert_eq!(
        arguments.body[0],
        Stmt::AnnAssign {
            target: "id".to_string(),
            annotation: Expr::name("str"),
            value: None,
        },
    );

    let document = meta_document(operation);
    assert!(document.starts_with("query GetUser"));
    Ok(())
}

#[test]
fn keyword_variables_are_escaped_with_an_alias() -> Result<(), GenerateError> {
    let module = compile(
        "type Query { items(from: String): [String!] }",
        "query Items($from: String) { items(from: $from) }",
    )?;
    let operation = class_named(&module.body, "Items");
    let arguments = class_named(&operation.body, "Arguments");
    assert_eq!(
        arguments.body[0],
        Stmt::AnnAssign {
            target: "from_".to_string(),
            annotation: Expr::optional(Expr::name("str")),
            value: Some(Expr::call(
                Expr::name("Field"),
                vec![],
                vec![
                    KeywordArg::new("alias", Expr::string("from")),
                    KeywordArg::new("default", Expr::Constant(Constant::None)),
                ],
            )),
        },
    );
    Ok(())
}

#[test]
fn variable_defaults_become_attribute_defaults() -> Result<(), GenerateError> {
    let module = compile(
        "type Query { hello(greeting: String): String! }",
        "query Hello($greeting: String = \"hi\") { hello(greeting: $greeting) }",
    )?;
    let operation = class_named(&module.body, "Hello");
    let arguments = class_named(&operation.body, "Arguments");
    let Stmt::AnnAssign { value, .. } = &arguments.body[0] else {
        panic!("expected the greeting attribute");
    };
    assert_eq!(value, &Some(Expr::string("hi")));
    Ok(())
}

#[test]
fn wire_documents_inline_spread_fragments() -> Result<(), GenerateError> {
    let module = compile(
        USER_SDL,
        "fragment UserFields on User { id name }\n\
         query GetUser($id: ID!) { user(id: $id) { ...UserFields } }",
    )?;
    let operation = class_named(&module.body, "GetUser");
    let document = meta_document(operation);
    assert!(document.contains("fragment UserFields on User"));
    assert!(document.contains("...UserFields"));
    Ok(())
}

#[test]
fn wire_documents_carry_injected_typenames() -> Result<(), GenerateError> {
    let module = compile(USER_SDL, "query GetUser($id: ID!) { user(id: $id) { id } }")?;
    let operation = class_named(&module.body, "GetUser");
    let document = meta_document(operation);
    assert!(document.contains("__typename"));
    // The operation root itself is left alone.
    assert!(!document.contains("__typename\n}\nquery"));
    Ok(())
}

#[test]
fn nested_selection_classes_pin_their_typename() -> Result<(), GenerateError> {
    let module = compile(USER_SDL, "query GetUser($id: ID!) { user(id: $id) { id } }")?;
    let nested = class_named(&module.body, "GetUserUser");
    assert_eq!(
        nested.body[0],
        Stmt::AnnAssign {
            target: "typename".to_string(),
            annotation: Expr::literal_str("User"),
            value: Some(Expr::call(
                Expr::name("Field"),
                vec![],
                vec![
                    KeywordArg::new("alias", Expr::string("__typename")),
                    KeywordArg::new("default", Expr::string("User")),
                ],
            )),
        },
    );
    Ok(())
}

#[test]
fn selected_fields_are_snake_cased_with_aliases() -> Result<(), GenerateError> {
    let module = compile(USER_SDL, "query GetUser($id: ID!) { user(id: $id) { createdAt } }")?;
    let nested = class_named(&module.body, "GetUserUser");
    let Stmt::AnnAssign { target, value, .. } = &nested.body[1] else {
        panic!("expected the createdAt attribute");
    };
    assert_eq!(target, "created_at");
    assert_eq!(
        value,
        &Some(Expr::call(
            Expr::name("Field"),
            vec![],
            vec![
                KeywordArg::new("alias", Expr::string("createdAt")),
                KeywordArg::new("default", Expr::Constant(Constant::None)),
            ],
        )),
    );
    Ok(())
}

#[test]
fn duplicate_operation_names_are_rejected() {
    let schema = Schema::from_str("type Query { ok: Boolean! }").unwrap();
    let documents = vec![
        ast::query::parse("query Check { ok }").unwrap(),
        ast::query::parse("query Check { ok }").unwrap(),
    ];
    let error = generate(&schema, &documents, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::Registry(RegistryError::AlreadyRegistered {
            category: "query",
            ..
        }),
    ));
}

#[test]
fn inline_fragments_on_union_non_members_are_rejected() {
    let error = compile(
        "type User { id: ID! }\n\
         type Post { id: ID! }\n\
         type Comment { id: ID! }\n\
         union Feed = User | Post\n\
         type Query { feed: Feed }",
        "query GetFeed { feed { ... on Comment { id } } }",
    )
    .unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::Unsupported(_),
    ));
}

#[test]
fn anonymous_operations_are_rejected() {
    let error = compile(USER_SDL, "{ user(id: \"1\") { id } }").unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::UnnamedOperation,
    ));
}

#[test]
fn the_configured_domain_lands_in_meta() -> Result<(), GenerateError> {
    let mut config = GeneratorConfig::default();
    config.domain = Some("accounts".to_string());
    let module = compile_with(
        USER_SDL,
        "query GetUser($id: ID!) { user(id: $id) { id } }",
        &config,
    )?;
    let operation = class_named(&module.body, "GetUser");
    let meta = class_named(&operation.body, "Meta");
    assert_eq!(
        meta.body[1],
        Stmt::Assign {
            target: "domain".to_string(),
            value: Expr::string("accounts"),
        },
    );
    Ok(())
}
