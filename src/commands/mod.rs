pub mod create;
pub mod interpret;
pub mod lifecycle;
pub mod list;
pub mod repl;
pub mod show;
