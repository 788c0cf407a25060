use serde::{Deserialize, Serialize};

/// Interactive shell configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShellConfig {
    /// Working DNS class for shell lookups (default: "IN")
    #[serde(default = "default_class")]
    pub class: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            class: default_class(),
        }
    }
}

fn default_class() -> String {
    "IN".to_string()
}
