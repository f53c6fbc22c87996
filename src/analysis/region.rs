use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an owner's mailing address is inside the home region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionClass {
    InRegion,
    OutOfRegion,
}

impl RegionClass {
    /// Classify a mailing-region cell against the home region code.
    ///
    /// Both sides are trimmed and upper-cased before comparing. Empty or
    /// unrecognized cells are out-of-region.
    pub fn classify(value: &str, home_region: &str) -> Self {
        if value.trim().to_uppercase() == home_region.trim().to_uppercase() {
            RegionClass::InRegion
        } else {
            RegionClass::OutOfRegion
        }
    }
}

impl fmt::Display for RegionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionClass::InRegion => write!(f, "In-State"),
            RegionClass::OutOfRegion => write!(f, "Out-of-State"),
        }
    }
}

/// In-region vs out-of-region owner counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBreakdown {
    pub home_region: String,
    pub in_region: usize,
    pub out_of_region: usize,
}

impl RegionBreakdown {
    /// Classify every value and count each class.
    ///
    /// # Examples
    ///
    /// ```
    /// use seller_report::analysis::RegionBreakdown;
    ///
    /// let breakdown = RegionBreakdown::from_values(["FL", "fl", " FL ", "GA"], "FL");
    /// assert_eq!(breakdown.in_region, 3);
    /// assert_eq!(breakdown.out_of_region, 1);
    /// ```
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>, home_region: &str) -> Self {
        let (mut in_region, mut out_of_region) = (0, 0);
        for value in values {
            match RegionClass::classify(value, home_region) {
                RegionClass::InRegion => in_region += 1,
                RegionClass::OutOfRegion => out_of_region += 1,
            }
        }
        Self {
            home_region: home_region.trim().to_uppercase(),
            in_region,
            out_of_region,
        }
    }

    pub fn total(&self) -> usize {
        self.in_region + self.out_of_region
    }

    /// Non-empty classes with their counts, larger class first.
    ///
    /// This is the slice order of the absentee pie chart; equal counts put
    /// out-of-region first.
    pub fn classes(&self) -> Vec<(RegionClass, usize)> {
        let mut classes = vec![
            (RegionClass::OutOfRegion, self.out_of_region),
            (RegionClass::InRegion, self.in_region),
        ];
        classes.retain(|(_, count)| *count > 0);
        classes.sort_by(|a, b| b.1.cmp(&a.1));
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_normalizes_case_and_whitespace() {
        assert_eq!(RegionClass::classify("FL", "FL"), RegionClass::InRegion);
        assert_eq!(RegionClass::classify("fl", "FL"), RegionClass::InRegion);
        assert_eq!(RegionClass::classify(" FL ", "FL"), RegionClass::InRegion);
        assert_eq!(RegionClass::classify("Fl\t", "fl"), RegionClass::InRegion);
        assert_eq!(RegionClass::classify("GA", "FL"), RegionClass::OutOfRegion);
    }

    #[test]
    fn test_empty_cell_is_out_of_region() {
        assert_eq!(RegionClass::classify("", "FL"), RegionClass::OutOfRegion);
    }

    #[test]
    fn test_breakdown_counts() {
        let breakdown = RegionBreakdown::from_values(["FL", "fl", " FL ", "GA"], "FL");
        assert_eq!(breakdown.in_region, 3);
        assert_eq!(breakdown.out_of_region, 1);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.home_region, "FL");
    }

    #[test]
    fn test_classes_order_and_empty_classes() {
        let breakdown = RegionBreakdown::from_values(["FL", "FL", "GA"], "FL");
        assert_eq!(
            breakdown.classes(),
            vec![(RegionClass::InRegion, 2), (RegionClass::OutOfRegion, 1)]
        );

        let all_out = RegionBreakdown::from_values(["GA", "NY"], "FL");
        assert_eq!(all_out.classes(), vec![(RegionClass::OutOfRegion, 2)]);

        let none = RegionBreakdown::from_values(std::iter::empty(), "FL");
        assert!(none.classes().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(RegionClass::InRegion.to_string(), "In-State");
        assert_eq!(RegionClass::OutOfRegion.to_string(), "Out-of-State");
    }

    proptest! {
        #[test]
        fn prop_classes_sum_to_record_count(values in prop::collection::vec("[ a-zA-Z]{0,4}", 0..200)) {
            let breakdown = RegionBreakdown::from_values(values.iter().map(String::as_str), "FL");
            prop_assert_eq!(breakdown.total(), values.len());
        }
    }
}
