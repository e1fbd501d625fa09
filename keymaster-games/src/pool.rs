use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// A function producing the candidate values for one placeholder.
///
/// Resolvers read only static tables and the option snapshot owned by the
/// game definition, so calling one twice with the same snapshot yields the
/// same pool.
pub type Resolver<G> = fn(&G) -> ValuePool;

/// Candidate values for a placeholder.
///
/// Lists keep their order and their duplicates: a repeated entry is sampled
/// proportionally more often by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ValuePool {
    Values(Vec<String>),
    /// Half-open integer range.
    Range(Range<u32>),
}

impl ValuePool {
    #[must_use]
    pub fn from_static(values: &[&str]) -> Self {
        Self::Values(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// Collect values and sort them ascending.
    #[must_use]
    pub fn sorted<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        values.sort();
        Self::Values(values)
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::Values(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Values(values) => values.len(),
            Self::Range(range) => range.end.saturating_sub(range.start) as usize,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Values(values) => values.iter().any(|v| v == value),
            Self::Range(range) => value.parse::<u32>().is_ok_and(|n| range.contains(&n)),
        }
    }

    /// Number of times `value` appears in the pool.
    #[must_use]
    pub fn count_of(&self, value: &str) -> usize {
        match self {
            Self::Values(values) => values.iter().filter(|v| *v == value).count(),
            Self::Range(_) => usize::from(self.contains(value)),
        }
    }

    /// Every candidate as a string, ranges expanded in ascending order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Values(values) => values.clone(),
            Self::Range(range) => range.clone().map(|n| n.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        match self {
            Self::Values(values) => {
                let unique: BTreeSet<&str> = values.iter().map(String::as_str).collect();
                unique.len() != values.len()
            }
            Self::Range(_) => false,
        }
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        match self {
            Self::Values(values) => values.is_sorted(),
            Self::Range(_) => true,
        }
    }
}

impl From<Range<u32>> for ValuePool {
    fn from(range: Range<u32>) -> Self {
        Self::Range(range)
    }
}

impl From<Vec<String>> for ValuePool {
    fn from(values: Vec<String>) -> Self {
        Self::Values(values)
    }
}
