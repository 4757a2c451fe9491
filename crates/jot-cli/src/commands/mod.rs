pub mod add;
pub mod common;
pub mod delete;
pub mod export;
pub mod list;
