pub mod add_vault;
pub mod create_vault;
pub mod recall_vault;
pub mod remove_vault;

pub use add_vault::*;
pub use create_vault::*;
pub use recall_vault::*;
pub use remove_vault::*;
