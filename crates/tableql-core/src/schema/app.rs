mod arg;
pub use arg::Arg;

mod field;
pub use field::{BelongsTo, Field, FieldTy, HasMany, ScalarField};

mod object;
pub use object::{Object, ObjectId};

mod query;
pub use query::{Query, QueryField};

mod schema;
pub use schema::Schema;
