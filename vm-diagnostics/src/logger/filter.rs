use crate::LogLevel;
use std::collections::HashSet;
use std::env;

/// Decides whether messages of a category are formatted and dispatched at all
pub trait LogFilter: Send + Sync {
    fn accepts(&self, category: &str) -> bool;
}

impl<F> LogFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accepts(&self, category: &str) -> bool {
        self(category)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct AllCategories;

impl LogFilter for AllCategories {
    fn accepts(&self, _category: &str) -> bool {
        true
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NoCategories;

impl LogFilter for NoCategories {
    fn accepts(&self, _category: &str) -> bool {
        false
    }
}

/// Accepts severity categories up to and including the given level.
/// `NONE` and custom categories are never accepted.
#[derive(Debug, Copy, Clone)]
pub struct MaxSeverity(pub LogLevel);

impl LogFilter for MaxSeverity {
    fn accepts(&self, category: &str) -> bool {
        match LogLevel::from_name(category) {
            None | Some(LogLevel::None) => false,
            Some(level) => level <= self.0,
        }
    }
}

/// An explicit set of enabled categories
#[derive(Debug, Default, Clone)]
pub struct EnabledCategories {
    categories: HashSet<String>,
}

impl EnabledCategories {
    pub fn new() -> Self {
        Default::default()
    }

    /// Read a comma separated list of categories from an environment variable
    pub fn from_env(variable: &str) -> Self {
        env::var(variable)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|each| !each.is_empty())
            .collect()
    }

    pub fn enable(&mut self, category: impl Into<String>) {
        self.categories.insert(category.into());
    }

    pub fn disable(&mut self, category: &str) -> bool {
        self.categories.remove(category)
    }

    pub fn enabled(&self) -> Vec<String> {
        let mut categories = self.categories.iter().cloned().collect::<Vec<String>>();
        categories.sort();
        categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EnabledCategories {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for EnabledCategories {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.categories.extend(iter.into_iter().map(Into::into));
    }
}

impl LogFilter for EnabledCategories {
    fn accepts(&self, category: &str) -> bool {
        self.categories.contains(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_categories() {
        let mut filter = EnabledCategories::new();
        assert!(!filter.accepts("INFO"));

        filter.enable("INFO");
        filter.enable("Beacon");
        assert!(filter.accepts("INFO"));
        assert!(filter.accepts("Beacon"));
        assert!(!filter.accepts("DEBUG"));
        assert_eq!(filter.enabled(), vec!["Beacon", "INFO"]);

        assert!(filter.disable("INFO"));
        assert!(!filter.accepts("INFO"));
        assert!(!filter.disable("INFO"));
    }

    #[test]
    fn parse_comma_separated_categories() {
        let filter = EnabledCategories::parse("ERROR, WARNING,,Beacon ");
        assert_eq!(filter.enabled(), vec!["Beacon", "ERROR", "WARNING"]);
        assert!(EnabledCategories::parse("").is_empty());
    }

    #[test]
    fn max_severity() {
        let filter = MaxSeverity(LogLevel::Info);
        assert!(filter.accepts("ERROR"));
        assert!(filter.accepts("WARNING"));
        assert!(filter.accepts("INFO"));
        assert!(!filter.accepts("DEBUG"));
        assert!(!filter.accepts("TRACE"));
        assert!(!filter.accepts("NONE"));
        assert!(!filter.accepts("Beacon"));
    }

    #[test]
    fn closures_are_filters() {
        let filter = |category: &str| category.starts_with("GC");
        assert!(filter.accepts("GC-scavenge"));
        assert!(!filter.accepts("INFO"));
        assert!(AllCategories.accepts("anything"));
        assert!(!NoCategories.accepts("ERROR"));
    }
}
