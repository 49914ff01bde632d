pub mod configuration;
pub mod image;
