pub mod core;
pub mod mathocr;
