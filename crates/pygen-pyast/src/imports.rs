use crate::Stmt;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Render a set of dotted import paths into import statements.
///
/// Bare names become `import name`; dotted paths are grouped by their module
/// prefix into `from module import a, b`. Output is sorted so regeneration
/// is deterministic.
pub fn import_statements<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<Stmt> {
    let mut lone: BTreeSet<&str> = BTreeSet::new();
    let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for path in paths {
        match path.rsplit_once('.') {
            Some((module, name)) => {
                grouped.entry(module).or_default().insert(name);
            }
            None => {
                lone.insert(path);
            }
        }
    }

    let mut statements: Vec<Stmt> = lone
        .into_iter()
        .map(|module| Stmt::Import {
            module: module.to_string(),
        })
        .collect();

    for (module, names) in grouped {
        statements.push(Stmt::ImportFrom {
            module: module.to_string(),
            names: names.into_iter().map(str::to_string).collect(),
        });
    }

    statements
}
