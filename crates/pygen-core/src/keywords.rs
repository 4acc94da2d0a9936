/// Python 3 reserved words. An identifier colliding with one of these is
/// escaped with a trailing underscore and the original wire name is carried
/// as a pydantic `Field(alias=...)`.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Append `_` if `name` is a Python reserved word.
pub fn escape_python_keyword(name: String) -> String {
    if is_python_keyword(&name) {
        format!("{name}_")
    } else {
        name
    }
}
