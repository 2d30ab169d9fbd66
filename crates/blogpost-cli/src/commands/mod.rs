// crates/blogpost-cli/src/commands/mod.rs - Command Handler Modules
//
// - create: the interactive post scaffolding flow

pub mod create;
