//! Placeholder substitution applied to posts after construction.

/// Ordered find/replace rules.
///
/// Rules apply sequentially in insertion order. Callers keep placeholder
/// tokens disjoint, so ordering cannot cascade one rule into another.
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    rules: Vec<(String, String)>,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule mapping every occurrence of `from` to `to`.
    pub fn rule(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rules.push((from.into(), to.into()));
        self
    }

    /// Applies every rule to `input`.
    pub fn replace(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_rules_in_order() {
        let replacer = Replacer::new()
            .rule("@media", "/static/media")
            .rule("@theme", "/static/theme");
        assert_eq!(
            replacer.replace("<img src=\"@media/a.png\"> and @theme/style.css"),
            "<img src=\"/static/media/a.png\"> and /static/theme/style.css"
        );
    }

    #[test]
    fn empty_replacer_is_identity() {
        let replacer = Replacer::new();
        assert!(replacer.is_empty());
        assert_eq!(replacer.replace("untouched"), "untouched");
    }

    #[test]
    fn replaces_repeated_occurrences() {
        let replacer = Replacer::new().rule("@x", "y");
        assert_eq!(replacer.replace("@x @x"), "y y");
    }
}
