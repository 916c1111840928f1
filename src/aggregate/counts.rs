use crate::types::{Dataset, GroupCount, YearCount};
use std::cmp::Ordering;
use std::collections::HashMap;

/// String → count tally that remembers the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// One entry per key, first-seen order.
    pub fn into_group_counts(self) -> Vec<GroupCount> {
        self.entries
            .into_iter()
            .map(|(key, count)| GroupCount { key, count })
            .collect()
    }

    /// The `n` largest groups, descending. Equal counts keep first-seen order.
    pub fn top(self, n: usize) -> Vec<GroupCount> {
        let mut groups = self.into_group_counts();
        groups.sort_by(|a, b| b.count.cmp(&a.count)); // stable
        groups.truncate(n);
        groups
    }

    /// Keys read as years, ascending. See [`year_order`].
    pub fn into_year_counts(self) -> Vec<YearCount> {
        let mut years: Vec<YearCount> = self
            .entries
            .into_iter()
            .map(|(year, count)| YearCount { year, count })
            .collect();
        years.sort_by(|a, b| year_order(&a.year, &b.year));
        years
    }
}

impl<'a> FromIterator<&'a str> for Counts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for key in iter {
            counts.add(key);
        }
        counts
    }
}

/// Tally the non-empty values of `column`.
pub fn count_by(dataset: &Dataset, column: &str) -> Counts {
    dataset.iter().filter_map(|r| r.non_empty(column)).collect()
}

/// Numeric years ascending; anything that is not a finite number sorts first,
/// lexicographically. Equal numbers ("2020", "2020.0") fall back to the text.
pub fn year_order(a: &str, b: &str) -> Ordering {
    match (numeric_year(a), numeric_year(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn numeric_year(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
