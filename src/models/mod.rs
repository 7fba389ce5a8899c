pub mod common;
pub mod expense;
pub mod receipt;
pub mod settings;

pub use common::*;
pub use expense::*;
pub use receipt::*;
pub use settings::*;
