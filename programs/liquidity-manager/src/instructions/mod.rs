pub mod admin;
pub mod initialize;
pub mod users;
pub mod vault;

pub use admin::*;
pub use initialize::*;
pub use users::*;
pub use vault::*;
