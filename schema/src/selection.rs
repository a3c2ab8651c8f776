use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The gender filter is single-choice, unlike type and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenderFilter {
    #[default]
    All,
    Only(String),
}

impl GenderFilter {
    /// Interprets raw widget input. Blank input and "all" mean no restriction.
    pub fn from_input(input: &str) -> Self {
        let value = input.trim().to_lowercase();
        if value.is_empty() || value == "all" {
            GenderFilter::All
        } else {
            GenderFilter::Only(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, GenderFilter::All)
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderFilter::All => write!(f, "all"),
            GenderFilter::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Snapshot of the filter widgets, taken fresh for every filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub query: String,
    pub types: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub gender: GenderFilter,
}

impl FilterSelection {
    /// A selection with every filter cleared.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.types = normalize_values(types);
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.colors = normalize_values(colors);
        self
    }

    pub fn with_gender(mut self, gender: GenderFilter) -> Self {
        self.gender = gender;
        self
    }

    /// The query as the text predicate compares it: trimmed and lowercased.
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    pub fn is_cleared(&self) -> bool {
        self.normalized_query().is_empty()
            && self.types.is_empty()
            && self.colors.is_empty()
            && self.gender.is_all()
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| {
            if set.is_empty() {
                "any".to_string()
            } else {
                set.iter().cloned().collect::<Vec<_>>().join(", ")
            }
        };
        write!(
            f,
            "query=\"{}\" types=[{}] colors=[{}] gender={}",
            self.normalized_query(),
            join(&self.types),
            join(&self.colors),
            self.gender
        )
    }
}

fn normalize_values<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gender_input_all_and_blank_mean_unrestricted() {
        assert_eq!(GenderFilter::from_input("all"), GenderFilter::All);
        assert_eq!(GenderFilter::from_input("  ALL "), GenderFilter::All);
        assert_eq!(GenderFilter::from_input(""), GenderFilter::All);
        assert_eq!(
            GenderFilter::from_input("Female"),
            GenderFilter::Only("female".to_string())
        );
    }

    #[test]
    fn test_selection_normalizes_values_and_query() {
        let selection = FilterSelection::cleared()
            .with_query("  Char ")
            .with_types(["Fire", " ", "fire", "water"]);

        assert_eq!(selection.normalized_query(), "char");
        assert_eq!(selection.types.len(), 2);
        assert!(selection.types.contains("fire"));
        assert!(!selection.is_cleared());
    }

    #[test]
    fn test_whitespace_query_counts_as_cleared() {
        let selection = FilterSelection::cleared().with_query("   ");
        assert!(selection.is_cleared());
    }
}
