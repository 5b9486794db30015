pub mod image;
pub mod settings;
