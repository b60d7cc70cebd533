mod constraint;
pub use constraint::{Constraint, ConstraintLength, ConstraintRange};

mod field;
pub use field::{DecimalTy, Field, FieldTy, PasswordTy};

mod model;
pub use model::{Model, ModelBuilder};

mod relation;
pub use relation::{ForeignKey, Relation};
