//! Houses the `compare` function
//!
use std::{fmt, str::FromStr};

use crate::error::UnknownResultKey;
use crate::manifest::DependencyMap;

/// Names one of the three lists of a `Comparison`. The `as_str` names are
/// stable: they are what callers use to pick the list they want shown.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ResultKey {
    /// Coordinates declared by both manifests (`intersect`)
    Intersect,
    /// Coordinates declared only by the candidate manifest (`dep-only`)
    DepOnly,
    /// Coordinates declared only by the target manifest (`base-only`)
    BaseOnly,
}

impl ResultKey {
    /// Every key, in the order the lists are presented
    pub const ALL: [ResultKey; 3] = [ResultKey::Intersect, ResultKey::DepOnly, ResultKey::BaseOnly];

    /// The key's stable identifier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResultKey::Intersect => "intersect",
            ResultKey::DepOnly => "dep-only",
            ResultKey::BaseOnly => "base-only",
        }
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKey {
    type Err = UnknownResultKey;

    /// Accepts exactly the `as_str` identifiers
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ResultKey::ALL
            .into_iter()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| UnknownResultKey(name.to_owned()))
    }
}

/// The result of comparing two manifests. Each list is sorted in ascending
/// byte order and has no duplicates; no coordinate is in more than one list,
/// and together they hold every coordinate of either manifest.
#[derive(PartialEq, Eq, Debug, Default, Clone)]
pub struct Comparison {
    /// Coordinates in both manifests, whatever their versions
    pub intersection: Vec<String>,
    /// Coordinates in the candidate manifest only
    pub first_only: Vec<String>,
    /// Coordinates in the target manifest only
    pub second_only: Vec<String>,
}

impl Comparison {
    /// The list named by `key`
    #[must_use]
    pub fn get(&self, key: ResultKey) -> &[String] {
        match key {
            ResultKey::Intersect => &self.intersection,
            ResultKey::DepOnly => &self.first_only,
            ResultKey::BaseOnly => &self.second_only,
        }
    }
}

/// Compares the coordinates of `candidate` with those of `target`. Versions
/// play no part: `a:b` at `1.0` and `a:b` with no version are the same
/// dependency.
///
/// * `intersection` gets the coordinates present in both maps,
/// * `first_only` the ones present in `candidate` alone, and
/// * `second_only` the ones present in `target` alone.
///
#[must_use]
pub fn compare(candidate: &DependencyMap, target: &DependencyMap) -> Comparison {
    let (mut intersection, mut first_only): (Vec<String>, Vec<String>) =
        candidate.keys().cloned().partition(|coordinate| target.contains_key(coordinate));
    let mut second_only: Vec<String> = target
        .keys()
        .filter(|coordinate| !candidate.contains_key(*coordinate))
        .cloned()
        .collect();

    // `String`'s `Ord` is byte-wise, never locale-aware
    for list in [&mut intersection, &mut first_only, &mut second_only] {
        list.sort_unstable();
    }
    Comparison { intersection, first_only, second_only }
}
