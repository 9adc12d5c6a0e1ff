//! Keyword rules for automatic transaction categorization
//!
//! A description is lowercased and matched by substring against an ordered
//! rule table. The first rule with any matching keyword wins; descriptions
//! that match nothing (including empty ones) fall back to [`FALLBACK_CATEGORY`].

use serde::Deserialize;
use tracing::debug;

/// Label assigned when no rule matches
pub const FALLBACK_CATEGORY: &str = "Other";

/// Built-in rules in priority order
const BUILTIN_RULES: &[(&[&str], &str)] = &[
    (&["swiggy", "zomato", "pizza"], "Food"),
    (&["uber", "ola", "taxi"], "Transport"),
    (&["amazon", "flipkart"], "Shopping"),
];

/// One entry in the dispatch table: any keyword maps to `label`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    /// Stored lowercased
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// `description` must already be lowercased
    fn matches(&self, description: &str) -> bool {
        self.keywords.iter().any(|k| description.contains(k.as_str()))
    }
}

/// Ordered keyword dispatch table
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(keywords, label)| CategoryRule::new(*label, keywords.iter()))
                .collect(),
        }
    }
}

impl Categorizer {
    /// Built-in table followed by `extra` rules (built-ins keep priority)
    pub fn with_extra_rules(extra: impl IntoIterator<Item = CategoryRule>) -> Self {
        let mut categorizer = Self::default();
        categorizer.rules.extend(
            extra
                .into_iter()
                .map(|r| CategoryRule::new(r.label, r.keywords))
                .filter(|r| !r.keywords.is_empty()),
        );
        categorizer
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Map a free-text description to a category label. Never fails.
    pub fn categorize(&self, description: &str) -> &str {
        let desc = description.to_lowercase();

        for rule in &self.rules {
            if rule.matches(&desc) {
                debug!(description, category = %rule.label, "Matched category rule");
                return &rule.label;
            }
        }

        FALLBACK_CATEGORY
    }
}

/// Categorize with the built-in rule table only
pub fn categorize(description: &str) -> String {
    Categorizer::default().categorize(description).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules() {
        assert_eq!(categorize("Swiggy order"), "Food");
        assert_eq!(categorize("zomato"), "Food");
        assert_eq!(categorize("Dominos Pizza"), "Food");
        assert_eq!(categorize("Uber trip"), "Transport");
        assert_eq!(categorize("Ola cab"), "Transport");
        assert_eq!(categorize("airport TAXI"), "Transport");
        assert_eq!(categorize("Flipkart sale"), "Shopping");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("AMAZON purchase"), "Shopping");
        assert_eq!(categorize("sWiGgY"), "Food");
    }

    #[test]
    fn test_rule_priority() {
        // Food is checked before Transport
        assert_eq!(categorize("Pizza from Zomato, paid via Uber"), "Food");
        // Transport is checked before Shopping
        assert_eq!(categorize("Amazon delivery by taxi"), "Transport");
    }

    #[test]
    fn test_fallback_to_other() {
        assert_eq!(categorize(""), "Other");
        assert_eq!(categorize("   "), "Other");
        assert_eq!(categorize("Electricity bill"), "Other");
    }

    #[test]
    fn test_substring_match() {
        // "ola" appears inside "Coca-Cola"; substring rules take it literally
        assert_eq!(categorize("Coca-Cola"), "Transport");
    }

    #[test]
    fn test_deterministic() {
        let categorizer = Categorizer::default();
        let first = categorizer.categorize("Uber Eats pizza").to_string();
        for _ in 0..10 {
            assert_eq!(categorizer.categorize("Uber Eats pizza"), first);
        }
        assert_eq!(first, "Food");
    }

    #[test]
    fn test_extra_rules_after_builtins() {
        let categorizer = Categorizer::with_extra_rules(vec![
            CategoryRule::new("Utilities", ["Electricity", "water"]),
            CategoryRule::new("Groceries", ["bigbasket", "pizza"]),
            CategoryRule::new("Ignored", Vec::<String>::new()),
        ]);

        assert_eq!(categorizer.categorize("ELECTRICITY bill"), "Utilities");
        assert_eq!(categorizer.categorize("BigBasket"), "Groceries");
        // Built-in Food still wins for pizza
        assert_eq!(categorizer.categorize("pizza"), "Food");
        assert_eq!(categorizer.categorize("rent"), "Other");
        assert_eq!(categorizer.rules().len(), 5);
    }

    #[test]
    fn test_builtin_table_order() {
        let categorizer = Categorizer::default();
        let labels: Vec<&str> = categorizer
            .rules()
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Food", "Transport", "Shopping"]);
    }
}
