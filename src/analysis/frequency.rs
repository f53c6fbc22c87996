use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A category and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    /// Display label; the empty category reads `(blank)`.
    pub fn label(&self) -> &str {
        if self.category.is_empty() {
            "(blank)"
        } else {
            &self.category
        }
    }
}

/// Count occurrences of each distinct value, most frequent first.
///
/// Every value, including the empty string, is its own category. Ties keep
/// the order in which the categories first appear.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(CategoryCount {
                    category: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `n` most frequent values.
///
/// # Examples
///
/// ```
/// use seller_report::analysis::top_n;
///
/// let ranked = top_n(["a", "b", "b", "c", "b", "a"], 2);
/// assert_eq!(ranked[0].category, "b");
/// assert_eq!(ranked[0].count, 3);
/// assert_eq!(ranked[1].category, "a");
/// assert_eq!(ranked.len(), 2);
/// ```
pub fn top_n<'a>(values: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<CategoryCount> {
    let mut counts = value_counts(values);
    counts.truncate(n);
    counts
}

/// Number of distinct values.
pub fn unique_count<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values
        .into_iter()
        .collect::<std::collections::HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_value_counts_descending() {
        let counts = value_counts(["x", "y", "y", "z", "y", "z"]);
        let pairs: Vec<(&str, usize)> = counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(pairs, vec![("y", 3), ("z", 2), ("x", 1)]);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let counts = value_counts(["b", "a", "c", "a", "b", "c"]);
        let order: Vec<&str> = counts.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_string_is_a_category() {
        let zips = [
            "33101", "", "33102", "33101", "", "33103", "33101", "", "33104", "33101", "33102",
            "33105",
        ];
        let counts = value_counts(zips);
        assert_eq!(counts[0].category, "33101");
        assert_eq!(counts[0].count, 4);
        assert_eq!(counts[1].category, "");
        assert_eq!(counts[1].count, 3);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 12);
    }

    #[test]
    fn test_top_n_limits() {
        let values = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(top_n(values, 5).len(), 5);
        assert_eq!(top_n(values, 10).len(), 7);
        assert!(top_n(values, 0).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let none: [&str; 0] = [];
        assert!(value_counts(none).is_empty());
        assert_eq!(unique_count(none), 0);
    }

    #[test]
    fn test_unique_count() {
        assert_eq!(unique_count(["a", "b", "a", ""]), 3);
    }

    proptest! {
        #[test]
        fn prop_rankings_non_increasing_and_unique(
            values in prop::collection::vec("[0-9]{0,2}", 0..300),
            n in 0usize..15,
        ) {
            let ranked = top_n(values.iter().map(String::as_str), n);
            prop_assert!(ranked.len() <= n);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
            let distinct: std::collections::HashSet<_> =
                ranked.iter().map(|c| c.category.as_str()).collect();
            prop_assert_eq!(distinct.len(), ranked.len());
        }
    }
}
