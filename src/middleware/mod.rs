pub mod body;
pub mod params;

pub use body::JsonOrForm;
pub use params::{ApiQuery, UserId};
