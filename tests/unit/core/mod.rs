pub mod canvas;
pub mod index;
