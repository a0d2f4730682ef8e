pub mod peek;
pub mod stack;
