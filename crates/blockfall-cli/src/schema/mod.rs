pub mod save;
pub mod settings;
