pub mod adaptors;
pub mod password;
pub mod token;
