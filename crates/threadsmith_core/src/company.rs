//! The product being marketed. Supplied per campaign.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyContext {
    pub name: String,
    pub product_description: String,
    pub value_propositions: Vec<String>,
    pub keywords: Vec<String>,
    /// Natural-language user pain points, precomputed by the campaign setup.
    #[serde(default)]
    pub activities: Vec<String>,
}

impl CompanyContext {
    /// Case-insensitive check for a product self-reference in a text.
    pub fn mentioned_in(&self, text: &str) -> bool {
        if self.name.is_empty() {
            return false;
        }
        text.to_lowercase().contains(&self.name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentioned_in_case_insensitive() {
        let company = CompanyContext {
            name: "Logpile".into(),
            product_description: "log aggregation".into(),
            value_propositions: vec![],
            keywords: vec![],
            activities: vec![],
        };
        assert!(company.mentioned_in("I switched to logpile last month"));
        assert!(!company.mentioned_in("still grepping files by hand"));
    }

    #[test]
    fn test_empty_name_never_matches() {
        let company = CompanyContext {
            name: String::new(),
            product_description: String::new(),
            value_propositions: vec![],
            keywords: vec![],
            activities: vec![],
        };
        assert!(!company.mentioned_in("anything at all"));
    }
}
