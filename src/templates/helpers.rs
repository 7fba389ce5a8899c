use minijinja::Value;

use crate::pdf::typst_str;

fn plain_text(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else {
        value.to_string()
    }
}

/// `{{ name | typst }}`: emits a quoted Typst string literal.
pub fn typst_filter(value: Value) -> String {
    typst_str(&plain_text(&value))
}

/// `{{ amount | money("₹") }}`: prefixes an already formatted amount.
pub fn money_filter(value: Value, symbol: Option<String>) -> String {
    format!("{}{}", symbol.unwrap_or_default(), plain_text(&value))
}
