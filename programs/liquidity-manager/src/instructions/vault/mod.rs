pub mod deposit;
pub mod set_weight;
pub mod stake_all;
pub mod unstake_all;
pub mod withdraw;

pub use deposit::*;
pub use set_weight::*;
pub use stake_all::*;
pub use unstake_all::*;
pub use withdraw::*;
