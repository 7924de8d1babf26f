use serde::Serialize;

/// One forbidden term found in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceFinding {
    pub term: String,
    pub occurrences: usize,
    /// Occurrences qualified by a plant-based prefix or suffix.
    pub excused: usize,
}

impl ComplianceFinding {
    pub fn is_violation(&self) -> bool {
        self.occurrences > self.excused
    }

    pub fn has_exception(&self) -> bool {
        self.excused > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub findings: Vec<ComplianceFinding>,
}

impl ComplianceReport {
    pub fn violations(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| f.is_violation())
            .map(|f| f.term.clone())
            .collect()
    }

    pub fn is_compliant(&self) -> bool {
        self.findings.iter().all(|f| !f.is_violation())
    }
}

/// Soft signals for a diet and cuisine pairing. Never blocks acceptance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticityAudit {
    pub spices_found: Vec<&'static str>,
    pub techniques_found: Vec<&'static str>,
    pub fusion_words: Vec<&'static str>,
}

impl AuthenticityAudit {
    pub const MIN_SPICES: usize = 3;

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.spices_found.len() < Self::MIN_SPICES {
            warnings.push(format!(
                "only {} traditional spices found, expected at least {}",
                self.spices_found.len(),
                Self::MIN_SPICES
            ));
        }
        if self.techniques_found.is_empty() {
            warnings.push("no traditional cooking technique mentioned".to_string());
        }
        if !self.fusion_words.is_empty() {
            warnings.push(format!(
                "possible fusion influence in title: {}",
                self.fusion_words.join(", ")
            ));
        }

        warnings
    }
}
