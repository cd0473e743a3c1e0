//! Category filter
//!
//! Maps the two filter dimensions (each tied to exactly one category
//! label) plus a per-dimension mode onto a row predicate. The dimension
//! set is a closed enumeration; modes are resolved by iterating
//! [`Dimension::ALL`], never by reflecting over dynamic keys.

use moldpick_common::model::{Mold, CATEGORY_DUAL_RESIN, CATEGORY_SHAKER};
use serde::{Deserialize, Serialize};

/// One independent filter axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Shaker molds
    Shaker,
    /// Dual-component resin molds
    DualResin,
}

impl Dimension {
    /// The fixed set of dimensions, in declaration order
    pub const ALL: [Dimension; 2] = [Dimension::Shaker, Dimension::DualResin];

    /// The category label this dimension selects
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Shaker => CATEGORY_SHAKER,
            Dimension::DualResin => CATEGORY_DUAL_RESIN,
        }
    }

}

/// Per-dimension filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep only rows matching this dimension's label
    Only,
    /// Drop rows matching this dimension's label
    Exclude,
    /// Dimension not constrained
    #[default]
    None,
}

impl FilterMode {
    /// Stable name used on the wire and in events
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Only => "only",
            FilterMode::Exclude => "exclude",
            FilterMode::None => "none",
        }
    }
}

/// Filter configuration: one mode per dimension
///
/// Mutable UI state; dimensions are independent and default to
/// [`FilterMode::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub shaker: FilterMode,
    #[serde(default)]
    pub dual: FilterMode,
}

impl FilterConfig {
    /// Mode configured for the given dimension
    pub fn mode(&self, dimension: Dimension) -> FilterMode {
        match dimension {
            Dimension::Shaker => self.shaker,
            Dimension::DualResin => self.dual,
        }
    }

    /// True when no dimension constrains the row set
    ///
    /// An unfiltered decide can push random selection to the remote store
    /// (count + offset) instead of fetching the whole table.
    pub fn is_unfiltered(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.mode(*d) == FilterMode::None)
    }

    /// Labels whose dimension mode is `only`, in dimension order
    pub fn only_labels(&self) -> Vec<&'static str> {
        self.labels_with(FilterMode::Only)
    }

    /// Labels whose dimension mode is `exclude`, in dimension order
    pub fn exclude_labels(&self) -> Vec<&'static str> {
        self.labels_with(FilterMode::Exclude)
    }

    fn labels_with(&self, mode: FilterMode) -> Vec<&'static str> {
        Dimension::ALL
            .iter()
            .filter(|d| self.mode(**d) == mode)
            .map(|d| d.label())
            .collect()
    }

    /// Decision rule for one effective category, evaluated in priority
    /// order:
    /// 1. exactly one `only` label: pass iff the category equals it
    ///    (the exclude set is ignored entirely);
    /// 2. two or more `only` labels: pass iff the category is a member
    ///    (exclude set still ignored);
    /// 3. no `only` labels: pass iff the category is not excluded.
    ///
    /// Uncategorized rows carry the EMPTY sentinel, which is never a real
    /// label: they pass by default and are only dropped implicitly by an
    /// active `only` filter.
    pub fn matches(&self, effective_category: &str) -> bool {
        let only = self.only_labels();
        match only.len() {
            1 => effective_category == only[0],
            n if n >= 2 => only.contains(&effective_category),
            _ => !self.exclude_labels().contains(&effective_category),
        }
    }
}

/// Apply the filter configuration to a row snapshot
///
/// Pure function; preserves the input's relative order. An empty result
/// is a valid, reportable state, not an error.
pub fn apply(rows: &[Mold], config: &FilterConfig) -> Vec<Mold> {
    rows.iter()
        .filter(|mold| config.matches(mold.effective_category()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mold(id: i64, category: Option<&str>) -> Mold {
        Mold {
            id,
            manufacturer: format!("maker-{}", id),
            product_name: format!("product-{}", id),
            image_url: None,
            category: category.map(String::from),
        }
    }

    /// Rows with categories {shaker, shaker, dual, uncategorized}
    fn sample_rows() -> Vec<Mold> {
        vec![
            mold(1, Some(CATEGORY_SHAKER)),
            mold(2, Some(CATEGORY_SHAKER)),
            mold(3, Some(CATEGORY_DUAL_RESIN)),
            mold(4, None),
        ]
    }

    fn ids(rows: &[Mold]) -> Vec<i64> {
        rows.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_default_config_passes_everything() {
        let rows = sample_rows();
        let filtered = apply(&rows, &FilterConfig::default());
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_single_only_ignores_exclude() {
        // only shaker + exclude dual: the only branch wins, exclude is
        // ignored entirely
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::Exclude,
        };

        let filtered = apply(&sample_rows(), &config);
        assert_eq!(ids(&filtered), vec![1, 2]);
    }

    #[test]
    fn test_multi_only_is_a_union() {
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::Only,
        };

        let filtered = apply(&sample_rows(), &config);
        // Both labeled categories pass, uncategorized does not
        assert_eq!(ids(&filtered), vec![1, 2, 3]);
    }

    #[test]
    fn test_exclude_only_path() {
        let config = FilterConfig {
            shaker: FilterMode::None,
            dual: FilterMode::Exclude,
        };

        let filtered = apply(&sample_rows(), &config);
        // Shaker rows and the uncategorized row survive
        assert_eq!(ids(&filtered), vec![1, 2, 4]);
    }

    #[test]
    fn test_uncategorized_dropped_by_only() {
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::None,
        };

        let filtered = apply(&[mold(9, None)], &config);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_exclude_everything_yields_uncategorized_only() {
        let config = FilterConfig {
            shaker: FilterMode::Exclude,
            dual: FilterMode::Exclude,
        };

        let filtered = apply(&sample_rows(), &config);
        // EMPTY is not a real label, so it is never excluded
        assert_eq!(ids(&filtered), vec![4]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::None,
        };

        let rows = vec![mold(1, Some(CATEGORY_DUAL_RESIN))];
        assert!(apply(&rows, &config).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            mold(5, Some(CATEGORY_SHAKER)),
            mold(1, None),
            mold(3, Some(CATEGORY_SHAKER)),
        ];
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::None,
        };
        assert_eq!(ids(&apply(&rows, &config)), vec![5, 3]);
    }

    #[test]
    fn test_is_unfiltered() {
        assert!(FilterConfig::default().is_unfiltered());
        assert!(!FilterConfig {
            shaker: FilterMode::Exclude,
            dual: FilterMode::None,
        }
        .is_unfiltered());
    }

    #[test]
    fn test_serde_round_trip_keys() {
        let config = FilterConfig {
            shaker: FilterMode::Only,
            dual: FilterMode::Exclude,
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["shaker"], "only");
        assert_eq!(json["dual"], "exclude");

        // Missing dimensions default to none
        let partial: FilterConfig = serde_json::from_str(r#"{"shaker": "only"}"#).unwrap();
        assert_eq!(partial.shaker, FilterMode::Only);
        assert_eq!(partial.dual, FilterMode::None);
    }
}
