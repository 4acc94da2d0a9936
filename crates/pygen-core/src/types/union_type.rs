/// A union type definition.
#[derive(Clone, Debug)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    /// Names of the member object types, in declaration order.
    pub members: Vec<String>,
}
