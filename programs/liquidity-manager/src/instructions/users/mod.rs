pub mod stake;
pub mod unstake;

pub use stake::*;
pub use unstake::*;
