pub mod user;

pub use user::{Exercise, User, UserRow};
