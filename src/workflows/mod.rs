pub mod commands;
pub mod shell;
pub mod timeline;
pub mod views;
pub mod weekly;
