pub mod nodes;

pub use nodes::{FieldDecl, StructDecl, TypeExpr};
