pub mod builder;
pub mod generator;

pub use builder::{sanitize_sheet_name, ExcelBuilder};
pub use generator::ExcelGenerator;
