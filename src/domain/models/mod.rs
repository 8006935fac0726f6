pub mod goal;
pub mod transaction;
