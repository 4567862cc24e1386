//! Client-side search, sort and filter state for list views
//!
//! Pure functions behind every admin list screen. The caller owns the raw
//! page of records plus the current search keyword and sort state, and
//! re-runs [`TableFilter::apply`] whenever any of them changes. Nothing here
//! mutates the input: results are fresh vectors of references into it.

use crate::collate::locale_compare;
use crate::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid sort order: {0}. Valid orders: asc, desc")]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}

/// Keep the records where any of `keys` contains `keyword`, ignoring case.
///
/// An empty keyword keeps everything in input order. Missing or null
/// fields read as the empty string, so with an empty `keys` slice and a
/// non-empty keyword nothing matches.
pub fn search<'a, T, K, I>(data: I, keyword: &str, keys: &[K]) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: Record<K> + 'a,
{
    if keyword.is_empty() {
        return data.into_iter().collect();
    }

    let needle = keyword.to_lowercase();

    data.into_iter()
        .filter(|record| {
            keys.iter().any(|key| {
                record
                    .field(key)
                    .to_text()
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .collect()
}

/// Compare two field values in ascending order.
///
/// A null on either side ties, two numbers compare numerically, and
/// anything else compares by string form with [`locale_compare`].
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Null, _) | (_, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        _ => locale_compare(&a.to_text(), &b.to_text()),
    }
}

/// Order records by `key`.
///
/// Ties keep their input order. Because nulls tie with everything the
/// comparison is not a total order, so this uses a merge sort that only
/// moves a record ahead of another when it is strictly smaller.
pub fn sort<'a, T, K, I>(data: I, key: &K, order: SortOrder) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: Record<K> + 'a,
{
    let decorated: Vec<(FieldValue<'a>, &'a T)> = data
        .into_iter()
        .map(|record| (record.field(key), record))
        .collect();

    let cmp = |a: &(FieldValue<'a>, &'a T), b: &(FieldValue<'a>, &'a T)| {
        order.apply(compare_values(&a.0, &b.0))
    };

    merge_sort_by(decorated, &cmp)
        .into_iter()
        .map(|(_, record)| record)
        .collect()
}

fn merge_sort_by<E, F>(mut items: Vec<E>, cmp: &F) -> Vec<E>
where
    F: Fn(&E, &E) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, cmp);
    let right = merge_sort_by(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if cmp(r, l) == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

/// [`search`] over a JSON document; anything but an array yields nothing.
pub fn search_json<'a, K>(data: &'a Value, keyword: &str, keys: &[K]) -> Vec<&'a Value>
where
    K: AsRef<str>,
{
    match data.as_array() {
        Some(items) => search(items, keyword, keys),
        None => Vec::new(),
    }
}

/// [`sort`] over a JSON document; anything but an array yields nothing.
pub fn sort_json<'a, K>(data: &'a Value, key: &K, order: SortOrder) -> Vec<&'a Value>
where
    K: AsRef<str>,
{
    match data.as_array() {
        Some(items) => sort(items, key, order),
        None => Vec::new(),
    }
}

/// Header marker for a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column is not the active sort key.
    Inactive,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::Inactive | SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SortIndicator::Inactive)
    }
}

/// Search and sort state for one list view.
///
/// Holds the keyword, the searchable keys and the optional sort key with
/// its direction. [`TableFilter::apply`] depends only on that state and the
/// data it is given, so it can be called again at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFilter<K> {
    search: String,
    searchable_keys: Vec<K>,
    sort_key: Option<K>,
    sort_order: SortOrder,
}

impl<K> TableFilter<K>
where
    K: Clone + PartialEq,
{
    /// No keyword, no sort.
    pub fn new(searchable_keys: Vec<K>) -> Self {
        Self {
            search: String::new(),
            searchable_keys,
            sort_key: None,
            sort_order: SortOrder::Asc,
        }
    }

    pub fn with_default_sort(mut self, key: K, order: SortOrder) -> Self {
        self.sort_key = Some(key);
        self.sort_order = order;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn searchable_keys(&self) -> &[K] {
        &self.searchable_keys
    }

    pub fn sort_key(&self) -> Option<&K> {
        self.sort_key.as_ref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Changing the keyword leaves the sort untouched.
    pub fn set_search(&mut self, keyword: impl Into<String>) {
        self.search = keyword.into();
    }

    pub fn set_sort_key(&mut self, key: K) {
        self.sort_key = Some(key);
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = None;
    }

    /// Header-click policy: the active key flips direction, any other key
    /// becomes active in ascending order.
    pub fn toggle_sort(&mut self, key: K) {
        if self.sort_key.as_ref() == Some(&key) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_key = Some(key);
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn sort_indicator(&self, column: &K) -> SortIndicator {
        match &self.sort_key {
            Some(key) if key == column => match self.sort_order {
                SortOrder::Asc => SortIndicator::Ascending,
                SortOrder::Desc => SortIndicator::Descending,
            },
            _ => SortIndicator::Inactive,
        }
    }

    /// Filter by the keyword, then order by the sort key when one is set.
    pub fn apply<'a, T, I>(&self, data: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: Record<K> + 'a,
    {
        let matched = search(data, &self.search, &self.searchable_keys);

        match &self.sort_key {
            Some(key) => sort(matched, key, self.sort_order),
            None => matched,
        }
    }
}
