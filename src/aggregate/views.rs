use super::counts::count_by;
use crate::types::{columns, Dataset, GroupCount, Metrics, YearCount};

/// How many makes the bar chart shows.
pub const TOP_MAKES: usize = 5;

pub fn summary_metrics(dataset: &Dataset) -> Metrics {
    Metrics {
        total_count: dataset.len(),
        unique_make_count: count_by(dataset, columns::MAKE).len(),
        unique_state_count: count_by(dataset, columns::STATE).len(),
    }
}

/// Most common makes, descending by count, at most `n` entries.
pub fn top_makes(dataset: &Dataset, n: usize) -> Vec<GroupCount> {
    count_by(dataset, columns::MAKE).top(n)
}

/// Registrations per model year, ascending. Only years present in the data appear.
pub fn growth_by_year(dataset: &Dataset) -> Vec<YearCount> {
    count_by(dataset, columns::MODEL_YEAR).into_year_counts()
}

/// Every EV type with its count, first-seen order.
pub fn ev_type_distribution(dataset: &Dataset) -> Vec<GroupCount> {
    count_by(dataset, columns::EV_TYPE).into_group_counts()
}
