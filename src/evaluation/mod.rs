//! Route validation and result consistency checks.

mod validator;

pub use validator::{validate_routes, ResultChecker};
