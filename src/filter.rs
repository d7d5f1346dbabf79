//! User-configured suppression of Sentry tags.

use regex::RegexSet;

/// A set of regular expressions matched against tag keys. A key is excluded
/// if any of the patterns matches it.
///
/// Compiled once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct ExclusionFilter(RegexSet);

impl ExclusionFilter {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RegexSet::new(patterns).map(ExclusionFilter)
    }

    /// A filter which excludes nothing.
    pub fn empty() -> Self {
        ExclusionFilter(RegexSet::empty())
    }

    pub fn matches(&self, key: &str) -> bool {
        self.0.is_match(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matches_nothing() {
        let filter = ExclusionFilter::empty();

        assert!(!filter.matches(""));
        assert!(!filter.matches("server_name"));
        assert_eq!(filter.len(), 0);
    }

    #[test]
    fn test_any_pattern_matches() {
        let filter = ExclusionFilter::new(["^server_name$", "^os\\.", "secret"]).unwrap();

        assert!(filter.matches("server_name"));
        assert!(filter.matches("os.name"));
        assert!(filter.matches("my_secret_token"));

        assert!(!filter.matches("server_name_2"));
        assert!(!filter.matches("runtime.name"));
        assert!(!filter.matches("url"));
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let res = ExclusionFilter::new(["^fine$", "(unclosed"]);

        assert!(res.is_err());
    }
}
