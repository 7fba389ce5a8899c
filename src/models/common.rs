use serde::{Deserialize, Serialize};

/// Display metadata printed at the top of every export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocietyInfo {
    pub name: String,
    pub sub_name: String,
    pub address: String,
}

impl Default for SocietyInfo {
    fn default() -> Self {
        SocietyInfo {
            name: "Shanti Niketan Co-operative Housing Society Ltd.".to_string(),
            sub_name: "Registered under the Maharashtra Co-operative Societies Act, 1960".to_string(),
            address: "Plot No. 12, Sector 17, Vashi, Navi Mumbai - 400703".to_string(),
        }
    }
}
