pub mod config;
pub mod paths;
pub mod platform;
pub mod shell;
pub mod terminal;
