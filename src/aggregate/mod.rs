//! Derived dashboard views over a loaded [`Dataset`].
//!
//! Every function here is pure: the same dataset always yields the same views,
//! and an empty dataset yields zero metrics and empty series.

use crate::types::{columns, Dataset, GroupCount, Metrics, YearCount};
use chrono::{DateTime, Utc};
use serde::{ser::SerializeSeq, Serialize, Serializer};
use std::fmt;

pub mod counts;
pub mod views;

pub use counts::{count_by, year_order, Counts};
pub use views::{ev_type_distribution, growth_by_year, summary_metrics, top_makes, TOP_MAKES};

/// The four views the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: Metrics,
    pub top_makes: Vec<GroupCount>,
    pub growth_by_year: Vec<YearCount>,
    #[serde(serialize_with = "name_value")]
    pub ev_types: Vec<GroupCount>,
}

/// Compute every view in one pass over `dataset`.
pub fn build_dashboard(dataset: &Dataset) -> Dashboard {
    let mut makes = Counts::new();
    let mut states = Counts::new();
    let mut years = Counts::new();
    let mut ev_types = Counts::new();

    for row in dataset {
        if let Some(make) = row.non_empty(columns::MAKE) {
            makes.add(make);
        }
        if let Some(state) = row.non_empty(columns::STATE) {
            states.add(state);
        }
        if let Some(year) = row.non_empty(columns::MODEL_YEAR) {
            years.add(year);
        }
        if let Some(ev_type) = row.non_empty(columns::EV_TYPE) {
            ev_types.add(ev_type);
        }
    }

    Dashboard {
        metrics: Metrics {
            total_count: dataset.len(),
            unique_make_count: makes.len(),
            unique_state_count: states.len(),
        },
        top_makes: makes.top(TOP_MAKES),
        growth_by_year: years.into_year_counts(),
        ev_types: ev_types.into_group_counts(),
    }
}

/// A dashboard stamped with when it was built, for the JSON report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub loaded: bool,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

impl Snapshot {
    pub fn new(dashboard: Dashboard, loaded: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            loaded,
            dashboard,
        }
    }
}

// The pie chart reads `{ name, value }`.
fn name_value<S: Serializer>(groups: &[GroupCount], ser: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Slice<'a> {
        name: &'a str,
        value: usize,
    }

    let mut seq = ser.serialize_seq(Some(groups.len()))?;
    for g in groups {
        seq.serialize_element(&Slice {
            name: &g.key,
            value: g.count,
        })?;
    }
    seq.end()
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "Total EVs:      {}", m.total_count)?;
        writeln!(f, "Unique Makes:   {}", m.unique_make_count)?;
        writeln!(f, "Unique States:  {}", m.unique_state_count)?;

        writeln!(f, "\nTop {} Makes", TOP_MAKES)?;
        for g in &self.top_makes {
            writeln!(f, "  {:<24} {:>8}", g.key, g.count)?;
        }

        writeln!(f, "\nEV Growth by Model Year")?;
        for y in &self.growth_by_year {
            writeln!(f, "  {:<24} {:>8}", y.year, y.count)?;
        }

        writeln!(f, "\nEV Type Distribution")?;
        for g in &self.ev_types {
            writeln!(f, "  {:<40} {:>8}", g.key, g.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::parse_dataset;
    use crate::types::Row;

    fn row(make: &str, state: &str, year: &str, ev_type: &str) -> Row {
        [
            (columns::MAKE, make),
            (columns::STATE, state),
            (columns::MODEL_YEAR, year),
            (columns::EV_TYPE, ev_type),
        ]
        .into_iter()
        .collect()
    }

    fn scenario() -> Dataset {
        Dataset::from_rows(vec![
            row("Tesla", "WA", "2020", "BEV"),
            row("Tesla", "CA", "2021", "BEV"),
            row("Nissan", "WA", "2020", "PHEV"),
        ])
    }

    /// Deterministic pseudo-random rows, including blanks in every column.
    fn generated(n: usize) -> Dataset {
        const MAKES: &[&str] = &["TESLA", "NISSAN", "KIA", "BMW", "FORD", "AUDI", "VOLVO", ""];
        const STATES: &[&str] = &["WA", "CA", "OR", "", "BC"];
        const YEARS: &[&str] = &["2011", "2024", "1999", "", "2018", "2020"];
        const TYPES: &[&str] = &[
            "Battery Electric Vehicle (BEV)",
            "Plug-in Hybrid Electric Vehicle (PHEV)",
            "",
        ];
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = |len: usize| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) as usize) % len
        };
        let rows = (0..n)
            .map(|_| {
                row(
                    MAKES[next(MAKES.len())],
                    STATES[next(STATES.len())],
                    YEARS[next(YEARS.len())],
                    TYPES[next(TYPES.len())],
                )
            })
            .collect();
        Dataset::from_rows(rows)
    }

    #[test]
    fn scenario_views() {
        let ds = scenario();
        assert_eq!(
            summary_metrics(&ds),
            Metrics {
                total_count: 3,
                unique_make_count: 2,
                unique_state_count: 2
            }
        );
        assert_eq!(
            top_makes(&ds, TOP_MAKES),
            vec![GroupCount::new("Tesla", 2), GroupCount::new("Nissan", 1)]
        );
        assert_eq!(
            growth_by_year(&ds),
            vec![YearCount::new("2020", 2), YearCount::new("2021", 1)]
        );
        assert_eq!(
            ev_type_distribution(&ds),
            vec![GroupCount::new("BEV", 2), GroupCount::new("PHEV", 1)]
        );
    }

    #[test]
    fn single_pass_matches_per_view_functions() {
        for ds in [scenario(), generated(500), Dataset::default()] {
            let dash = build_dashboard(&ds);
            assert_eq!(dash.metrics, summary_metrics(&ds));
            assert_eq!(dash.top_makes, top_makes(&ds, TOP_MAKES));
            assert_eq!(dash.growth_by_year, growth_by_year(&ds));
            assert_eq!(dash.ev_types, ev_type_distribution(&ds));
        }
    }

    #[test]
    fn views_are_idempotent() {
        let ds = generated(300);
        assert_eq!(build_dashboard(&ds), build_dashboard(&ds));
    }

    #[test]
    fn generated_data_holds_view_invariants() {
        let ds = generated(1_000);
        let dash = build_dashboard(&ds);

        assert!(dash.metrics.unique_make_count <= dash.metrics.total_count);
        assert_eq!(dash.metrics.unique_make_count, 7);
        assert_eq!(dash.metrics.unique_state_count, 4);

        assert!(dash.top_makes.len() <= TOP_MAKES);
        assert!(dash.top_makes.windows(2).all(|w| w[0].count >= w[1].count));

        let years: Vec<f64> = dash
            .growth_by_year
            .iter()
            .map(|y| y.year.parse::<f64>().unwrap())
            .collect();
        assert!(years.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(years, vec![1999.0, 2011.0, 2018.0, 2020.0, 2024.0]);

        let typed = ds
            .iter()
            .filter(|r| r.non_empty(columns::EV_TYPE).is_some())
            .count();
        assert_eq!(dash.ev_types.len(), 2);
        assert_eq!(dash.ev_types.iter().map(|g| g.count).sum::<usize>(), typed);
    }

    #[test]
    fn blank_make_counts_toward_total_only() {
        let ds = Dataset::from_rows(vec![
            row("Tesla", "WA", "2020", "BEV"),
            row("", "WA", "2020", "BEV"),
        ]);
        let dash = build_dashboard(&ds);
        assert_eq!(dash.metrics.total_count, 2);
        assert_eq!(dash.metrics.unique_make_count, 1);
        assert_eq!(dash.top_makes, vec![GroupCount::new("Tesla", 1)]);
    }

    #[test]
    fn top_makes_truncates_to_five() {
        let makes = ["A", "B", "C", "D", "E", "F", "G"];
        let rows = makes
            .iter()
            .enumerate()
            .flat_map(|(i, m)| (0..=i).map(move |_| row(m, "WA", "2020", "BEV")))
            .collect();
        let top = top_makes(&Dataset::from_rows(rows), TOP_MAKES);
        let names: Vec<&str> = top.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(names, vec!["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn growth_keeps_gaps_and_odd_years() {
        let ds = Dataset::from_rows(vec![
            row("Tesla", "WA", "2023", "BEV"),
            row("Tesla", "WA", "2011", "BEV"),
            row("Tesla", "WA", "unknown", "BEV"),
            row("Tesla", "WA", "", "BEV"),
            row("Tesla", "WA", "2023", "BEV"),
        ]);
        assert_eq!(
            growth_by_year(&ds),
            vec![
                YearCount::new("unknown", 1),
                YearCount::new("2011", 1),
                YearCount::new("2023", 2),
            ]
        );
    }

    #[test]
    fn uniqueness_is_case_sensitive() {
        let ds = Dataset::from_rows(vec![
            row("TESLA", "WA", "2020", "BEV"),
            row("Tesla", "wa", "2020", "BEV"),
        ]);
        let m = summary_metrics(&ds);
        assert_eq!(m.unique_make_count, 2);
        assert_eq!(m.unique_state_count, 2);
    }

    #[test]
    fn empty_dataset_degrades_to_zero() {
        let dash = build_dashboard(&Dataset::default());
        assert_eq!(dash.metrics, Metrics::default());
        assert!(dash.top_makes.is_empty());
        assert!(dash.growth_by_year.is_empty());
        assert!(dash.ev_types.is_empty());
    }

    #[test]
    fn parsed_csv_feeds_the_dashboard() {
        let text = "Make,State,Model Year,Electric Vehicle Type,City\n\
                    Tesla,WA,2020,BEV,Seattle\n\
                    Tesla,CA,2021,BEV,\n\
                    Nissan,WA,2020,PHEV,Tacoma\n";
        let dash = build_dashboard(&parse_dataset(text).unwrap());
        assert_eq!(dash, build_dashboard(&scenario()));
    }

    #[test]
    fn serializes_chart_shapes() {
        let json = serde_json::to_value(build_dashboard(&scenario())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "metrics": { "totalCount": 3, "uniqueMakeCount": 2, "uniqueStateCount": 2 },
                "topMakes": [ { "name": "Tesla", "count": 2 }, { "name": "Nissan", "count": 1 } ],
                "growthByYear": [ { "year": "2020", "count": 2 }, { "year": "2021", "count": 1 } ],
                "evTypes": [ { "name": "BEV", "value": 2 }, { "name": "PHEV", "value": 1 } ]
            })
        );
    }

    #[test]
    fn snapshot_flattens_dashboard() {
        let snap = Snapshot::new(build_dashboard(&scenario()), true);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["loaded"], true);
        assert_eq!(json["metrics"]["totalCount"], 3);
        assert!(json["generatedAt"].is_string());
    }

    #[test]
    fn text_report_lists_every_view() {
        let text = build_dashboard(&scenario()).to_string();
        assert!(text.contains("Total EVs:      3"));
        assert!(text.contains("Tesla"));
        assert!(text.contains("2021"));
        assert!(text.contains("PHEV"));
    }
}
