pub mod field;
pub mod step;

pub use field::{FieldKind, FieldSpec};
pub use step::Step;
