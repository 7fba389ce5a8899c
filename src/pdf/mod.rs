pub mod builder;
pub mod generator;

pub use builder::{typst_str, PdfBuilder};
pub use generator::{OutputKind, TypstCompiler};
