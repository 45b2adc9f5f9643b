mod eval;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_eq;
pub use expr_eq::ExprEq;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod filter;
pub use filter::Filter;

mod row;
pub use row::Row;

mod select;
pub use select::Select;

mod value;
pub use value::Value;
