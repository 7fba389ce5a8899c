pub mod engine;
pub mod helpers;
pub mod receipt;

pub use engine::TemplateEngine;
pub use receipt::{ReceiptTemplate, RECEIPT_TEMPLATE_ID};
