use pygen_pyast::ClassDef;
use pygen_pyast::Expr;
use pygen_pyast::Stmt;

use crate::ast;
use crate::compile::GeneratedModule;
use crate::compile::generate;
use crate::config::GeneratorConfig;
use crate::dependencies::DependencyError;
use crate::errors::GenerateError;
use crate::schema::Schema;

const ANIMAL_SDL: &str = "interface Animal { name: String! }\n\
     type Dog implements Animal { name: String! bark: String! }\n\
     type Cat implements Animal { name: String! meow: String! }\n\
     type Query { animal: Animal }";

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

fn class_position(statements: &[Stmt], name: &str) -> usize {
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

#[test]
fn fragments_are_emitted_in_dependency_order() -> Result<(), GenerateError> {
    let module = compile(
        "type User { id: ID! friend: User }\n\
         type Query { user: User }",
        "fragment Outer on User { id friend { ...Inner } }\n\
         fragment Inner on User { id }\n\
         query GetUser { user { ...Outer } }",
    )?;
    assert!(
        class_position(&module.body, "Inner") < class_position(&module.body, "Outer"),
    );
    Ok(())
}

#[test]
fn fragment_spread_cycles_are_rejected() {
    let error = compile(
        "type User { id: ID! friend: User }\n\
         type Query { user: User }",
        "fragment A on User { friend { ...B } }\n\
         fragment B on User { friend { ...A } }\n\
         query GetUser { user { ...A } }",
    )
    .unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::Dependency(DependencyError::FragmentCycle { .. }),
    ));
}

#[test]
fn interface_fragments_expand_into_mother_and_concrete_classes() -> Result<(), GenerateError> {
    let module = compile(
        ANIMAL_SDL,
        "fragment AnimalParts on Animal {\n\
             name\n\
             ... on Dog { bark }\n\
             ... on Cat { meow }\n\
         }\n\
         query GetAnimal { animal { ...AnimalParts } }",
    )?;

    let mother = class_named(&module.body, "AnimalPartsBase");
    let Stmt::AnnAssign { target, .. } = &mother.body[0] else {
        panic!("expected the typename attribute");
    };
    assert_eq!(target, "typename");

    let dog = class_named(&module.body, "AnimalPartsDog");
    assert_eq!(dog.bases, vec![Expr::name("AnimalPartsBase")]);
    let Stmt::AnnAssign { annotation, .. } = &dog.body[0] else {
        panic!("expected the typename attribute");
    };
    assert_eq!(annotation, &Expr::literal_str("Dog"));
    assert!(dog.body.iter().any(|stmt| stmt.symbol_name() == Some("bark")));

    class_named(&module.body, "AnimalPartsCat");
    Ok(())
}

#[test]
fn interface_alias_lists_concretes_then_base_and_skips_the_catchall() -> Result<(), GenerateError>
{
    let module = compile(
        ANIMAL_SDL,
        "fragment AnimalParts on Animal {\n\
             name\n\
             ... on Dog { bark }\n\
         }\n\
         query GetAnimal { animal { ...AnimalParts } }",
    )?;

    // The catch-all exists, outside the alias.
    class_named(&module.body, "AnimalPartsCatch");

    let alias_at = class_position(&module.body, "AnimalParts");
    let Stmt::Assign { value, .. } = &module.body[alias_at] else {
        panic!("expected the union alias");
    };
    assert_eq!(
        value,
        &Expr::union(vec![
            Expr::name("AnimalPartsDog"),
            Expr::name("AnimalPartsCat"),
            Expr::name("AnimalPartsBase"),
        ]),
    );
    Ok(())
}

#[test]
fn the_catchall_can_be_disabled() -> Result<(), GenerateError> {
    let mut config = GeneratorConfig::default();
    config.create_catchall = false;
    let module = compile_with(
        ANIMAL_SDL,
        "fragment AnimalParts on Animal { name }\n\
         query GetAnimal { animal { ...AnimalParts } }",
        &config,
    )?;
    assert!(
        !module
            .body
            .iter()
            .any(|stmt| stmt.symbol_name() == Some("AnimalPartsCatch")),
    );
    Ok(())
}

#[test]
fn union_fragments_alias_their_member_classes() -> Result<(), GenerateError> {
    let module = compile(
        "type User { id: ID! }\n\
         type Post { title: String! }\n\
         union SearchResult = User | Post\n\
         type Query { search: SearchResult }",
        "fragment Result on SearchResult {\n\
             ... on User { id }\n\
             ... on Post { title }\n\
         }\n\
         query Search { search { ...Result } }",
    )?;

    class_named(&module.body, "ResultUser");
    class_named(&module.body, "ResultPost");
    let alias_at = class_position(&module.body, "Result");
    let Stmt::Assign { value, .. } = &module.body[alias_at] else {
        panic!("expected the union alias");
    };
    assert_eq!(
        value,
        &Expr::union(vec![Expr::name("ResultUser"), Expr::name("ResultPost")]),
    );
    Ok(())
}

#[test]
fn direct_field_selections_on_unions_are_rejected() {
    let error = compile(
        "type User { id: ID! }\n\
         type Post { title: String! }\n\
         union SearchResult = User | Post\n\
         type Query { search: SearchResult }",
        "fragment Result on SearchResult { id }\n\
         query Search { search { ...Result } }",
    )
    .unwrap_err();
    assert!(matches!(
        unwrap_stages(error),
        GenerateError::UnionFieldSelection { .. },
    ));
}

#[test]
fn spreads_become_base_classes() -> Result<(), GenerateError> {
    let module = compile(
        "type User { id: ID! name: String! }\n\
         type Query { user: User }",
        "fragment UserFields on User { id }\n\
         query GetUser { user { ...UserFields name } }",
    )?;
    let nested = class_named(&module.body, "GetUserUser");
    assert_eq!(nested.bases[0], Expr::name("UserFields"));
    assert_eq!(nested.bases[1], Expr::name("BaseModel"));
    assert!(
        nested
            .body
            .iter()
            .any(|stmt| stmt.symbol_name() == Some("name")),
    );
    Ok(())
}

#[test]
fn a_lone_spread_reuses_the_fragment_class() -> Result<(), GenerateError> {
    let module = compile(
        "type User { id: ID! }\n\
         type Query { user: User }",
        "fragment UserFields on User { id }\n\
         query GetUser { user { ...UserFields } }",
    )?;
    assert!(
        !module
            .body
            .iter()
            .any(|stmt| stmt.symbol_name() == Some("GetUserUser")),
    );
    let operation = class_named(&module.body, "GetUser");
    let Stmt::AnnAssign { annotation, .. } = &operation.body[0] else {
        panic!("expected the user attribute");
    };
    assert_eq!(annotation, &Expr::optional(Expr::name("UserFields")));
    Ok(())
}

#[test]
fn interface_spreads_resolve_to_implementation_classes() -> Result<(), GenerateError> {
    let module = compile(
        ANIMAL_SDL,
        "fragment AnimalParts on Animal { name }\n\
         query GetAnimal {\n\
             animal {\n\
                 ... on Dog { ...AnimalParts bark }\n\
             }\n\
         }",
    )?;
    let dog = class_named(&module.body, "GetAnimalAnimalDog");
    assert!(dog.bases.contains(&Expr::name("AnimalPartsDog")));
    Ok(())
}
