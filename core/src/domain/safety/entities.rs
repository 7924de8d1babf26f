use serde::Deserialize;

/// Verdict of the independent safety classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SafetyVerdict {
    pub safe: bool,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl SafetyVerdict {
    pub fn mentions_allergens(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.to_lowercase().contains("allerg"))
    }
}
