pub use crate::errors::{AuthError, Error};

pub type Result<T, E = Error> = std::result::Result<T, E>;
