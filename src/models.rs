pub mod command;
pub mod note;
