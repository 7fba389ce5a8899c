use serde::{Deserialize, Serialize};

/// Host settings threaded into the receipt template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub treasurer_name: Option<String>,
    pub footer_note: Option<String>,
}
