// Path: crates/cli/src/commands/mod.rs

pub mod admin;
pub mod calls;
pub mod creator;
pub mod creators;
pub mod names;
pub mod proposal;
pub mod wallet;
