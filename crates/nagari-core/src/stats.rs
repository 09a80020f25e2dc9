//! Population statistics aggregation.
//!
//! Turns a flat list of [`JorongStatistic`] rows into the totals and chart
//! groupings shown on the statistics page. Both entry points are pure and
//! infallible: a year with no data is a normal state and produces a zeroed
//! [`Summary`], never an error.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::types::JorongStatistic;

/// An absolute count with its share of the total population.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Sum across the filtered records.
    pub count: u64,
    /// `count` as a percentage of the total population, 0 when that is 0.
    pub percentage: f64,
}

impl Bucket {
    fn of(count: u64, total: u64) -> Self {
        Self {
            count,
            percentage: percentage(count, total),
        }
    }
}

/// Age bracket breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroups {
    /// Ages 0-17.
    pub child: Bucket,
    /// Ages 18-59.
    pub adult: Bucket,
    /// Ages 60 and over.
    pub elderly: Bucket,
}

/// Gender breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderGroups {
    /// Male residents.
    pub male: Bucket,
    /// Female residents.
    pub female: Bucket,
}

/// One bar of the per-jorong stacked chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JorongPopulation {
    /// Jorong id.
    pub jorong_id: String,
    /// Jorong name.
    pub name: String,
    /// Population.
    pub population: u64,
    /// Male residents.
    pub male: u64,
    /// Female residents.
    pub female: u64,
}

/// Aggregated statistics for one year, optionally narrowed to one jorong.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Requested year.
    pub year: i32,
    /// Requested jorong filter, if any.
    pub jorong_id: Option<String>,
    /// Number of records that matched the filter.
    pub record_count: usize,
    /// Sum of `population`.
    pub total_population: u64,
    /// Sum of `male_count`.
    pub total_male: u64,
    /// Sum of `female_count`.
    pub total_female: u64,
    /// Sum of `households`.
    pub total_households: u64,
    /// Child/adult/elderly buckets.
    pub by_age_group: AgeGroups,
    /// Male/female buckets.
    pub by_gender: GenderGroups,
    /// Per-jorong breakdown in first-occurrence order of the input.
    pub by_jorong: Vec<JorongPopulation>,
}

impl Summary {
    /// Whether no record matched the filter.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// `part` as a percentage of `total`, guarded against a zero denominator.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Aggregate `records` for `year`, optionally restricted to one jorong.
pub fn compute_summary(records: &[JorongStatistic], year: i32, jorong_id: Option<&str>) -> Summary {
    let filtered = records
        .iter()
        .filter(|r| r.year == year)
        .filter(|r| jorong_id.is_none_or(|id| r.jorong_id == id));

    let mut summary = Summary {
        year,
        jorong_id: jorong_id.map(String::from),
        ..Summary::default()
    };
    let (mut child, mut adult, mut elderly) = (0u64, 0u64, 0u64);
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in filtered {
        summary.record_count += 1;
        summary.total_population += u64::from(record.population);
        summary.total_male += u64::from(record.male_count);
        summary.total_female += u64::from(record.female_count);
        summary.total_households += u64::from(record.households);
        child += u64::from(record.child_count);
        adult += u64::from(record.adult_count);
        elderly += u64::from(record.elderly_count);

        let index = *positions.entry(record.jorong_id.as_str()).or_insert_with(|| {
            summary.by_jorong.push(JorongPopulation {
                jorong_id: record.jorong_id.clone(),
                name: record.jorong_name.clone(),
                population: 0,
                male: 0,
                female: 0,
            });
            summary.by_jorong.len() - 1
        });
        let entry = &mut summary.by_jorong[index];
        entry.population += u64::from(record.population);
        entry.male += u64::from(record.male_count);
        entry.female += u64::from(record.female_count);
    }

    let total = summary.total_population;
    summary.by_age_group = AgeGroups {
        child: Bucket::of(child, total),
        adult: Bucket::of(adult, total),
        elderly: Bucket::of(elderly, total),
    };
    summary.by_gender = GenderGroups {
        male: Bucket::of(summary.total_male, total),
        female: Bucket::of(summary.total_female, total),
    };
    summary
}

/// Distinct years present in `records`, most recent first.
pub fn available_years(records: &[JorongStatistic]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(jorong: &str, year: i32, population: u32, male: u32, female: u32) -> JorongStatistic {
        JorongStatistic {
            id: format!("stat-{jorong}-{year}"),
            jorong_id: format!("jrg-{jorong}"),
            jorong_name: format!("Jorong {jorong}"),
            year,
            population,
            male_count: male,
            female_count: female,
            child_count: 0,
            adult_count: 0,
            elderly_count: 0,
            households: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn sample() -> JorongStatistic {
        JorongStatistic {
            child_count: 250,
            adult_count: 650,
            elderly_count: 100,
            households: 250,
            ..record("A", 2024, 1000, 520, 480)
        }
    }

    #[test]
    fn single_record_scenario() {
        let summary = compute_summary(&[sample()], 2024, None);
        assert_eq!(summary.total_population, 1000);
        assert_eq!(summary.total_male, 520);
        assert_eq!(summary.total_female, 480);
        assert_eq!(summary.total_households, 250);
        assert_eq!(summary.by_gender.male.percentage, 52.0);
        assert_eq!(summary.by_gender.female.percentage, 48.0);
        assert_eq!(summary.by_age_group.child.count, 250);
        assert_eq!(summary.by_age_group.child.percentage, 25.0);
        assert_eq!(summary.by_age_group.adult.percentage, 65.0);
        assert_eq!(summary.by_age_group.elderly.percentage, 10.0);
        assert_eq!(summary.by_jorong.len(), 1);
        assert_eq!(summary.by_jorong[0].name, "Jorong A");
    }

    #[test]
    fn year_without_data_is_zeroed() {
        let summary = compute_summary(&[sample()], 2023, None);
        assert!(summary.is_empty());
        assert_eq!(summary.total_population, 0);
        assert_eq!(summary.total_male, 0);
        assert_eq!(summary.total_households, 0);
        assert_eq!(summary.by_gender.male.percentage, 0.0);
        assert_eq!(summary.by_age_group.child.percentage, 0.0);
        assert!(summary.by_jorong.is_empty());
    }

    #[test]
    fn empty_input_never_produces_nan() {
        let summary = compute_summary(&[], 2024, None);
        for bucket in [
            summary.by_gender.male,
            summary.by_gender.female,
            summary.by_age_group.child,
            summary.by_age_group.adult,
            summary.by_age_group.elderly,
        ] {
            assert!(bucket.percentage.is_finite());
            assert_eq!(bucket.percentage, 0.0);
        }
    }

    #[test]
    fn zero_population_with_counts_is_guarded() {
        let summary = compute_summary(&[record("A", 2024, 0, 5, 5)], 2024, None);
        assert_eq!(summary.total_male, 5);
        assert_eq!(summary.by_gender.male.percentage, 0.0);
    }

    #[test]
    fn two_jorongs_keep_input_order() {
        let records = vec![record("Z", 2024, 300, 150, 150), record("B", 2024, 200, 90, 110)];
        let summary = compute_summary(&records, 2024, None);
        assert_eq!(summary.total_population, 500);
        let names: Vec<&str> = summary.by_jorong.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, vec!["Jorong Z", "Jorong B"]);
    }

    #[test]
    fn jorong_filter_narrows_result() {
        let records = vec![record("A", 2024, 300, 150, 150), record("B", 2024, 200, 90, 110)];
        let summary = compute_summary(&records, 2024, Some("jrg-B"));
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.total_population, 200);
        assert_eq!(summary.jorong_id.as_deref(), Some("jrg-B"));
        assert_eq!(summary.by_jorong[0].jorong_id, "jrg-B");
    }

    #[test]
    fn unknown_jorong_filter_is_empty() {
        let summary = compute_summary(&[sample()], 2024, Some("jrg-missing"));
        assert!(summary.is_empty());
        assert!(summary.by_jorong.is_empty());
    }

    #[test]
    fn other_years_are_excluded() {
        let records = vec![record("A", 2024, 300, 150, 150), record("A", 2023, 280, 140, 140)];
        let summary = compute_summary(&records, 2023, None);
        assert_eq!(summary.total_population, 280);
        assert_eq!(summary.by_jorong.len(), 1);
    }

    #[test]
    fn duplicate_jorong_rows_are_merged() {
        let records = vec![
            record("A", 2024, 100, 50, 50),
            record("B", 2024, 10, 5, 5),
            record("A", 2024, 20, 10, 10),
        ];
        let summary = compute_summary(&records, 2024, None);
        assert_eq!(summary.by_jorong.len(), 2);
        assert_eq!(summary.by_jorong[0].population, 120);
        assert_eq!(summary.by_jorong[0].male, 60);
        assert_eq!(summary.by_jorong[1].name, "Jorong B");
    }

    #[test]
    fn totals_are_order_independent() {
        let mut records = vec![
            record("A", 2024, 123, 60, 63),
            record("B", 2024, 456, 200, 256),
            record("C", 2024, 789, 400, 389),
        ];
        let forward = compute_summary(&records, 2024, None);
        records.reverse();
        let backward = compute_summary(&records, 2024, None);
        assert_eq!(forward.total_population, 123 + 456 + 789);
        assert_eq!(forward.total_population, backward.total_population);
        assert_eq!(forward.total_male, backward.total_male);
        assert_eq!(forward.total_female, backward.total_female);
    }

    #[test]
    fn gender_percentages_sum_to_hundred_when_consistent() {
        let records = vec![record("A", 2024, 777, 333, 444), record("B", 2024, 5, 2, 3)];
        let summary = compute_summary(&records, 2024, None);
        let sum = summary.by_gender.male.percentage + summary.by_gender.female.percentage;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn gender_counts_are_not_cross_validated() {
        let summary = compute_summary(&[record("A", 2024, 100, 30, 30)], 2024, None);
        assert_eq!(summary.total_population, 100);
        assert_eq!(summary.by_gender.male.percentage, 30.0);
        let sum = summary.by_gender.male.percentage + summary.by_gender.female.percentage;
        assert!(sum <= 100.0);
    }

    #[test]
    fn large_values_do_not_overflow() {
        let records = vec![
            record("A", 2024, u32::MAX, u32::MAX, 0),
            record("B", 2024, u32::MAX, u32::MAX, 0),
        ];
        let summary = compute_summary(&records, 2024, None);
        assert_eq!(summary.total_population, 2 * u64::from(u32::MAX));
        assert_eq!(summary.by_gender.male.percentage, 100.0);
    }

    #[test]
    fn available_years_descending_and_distinct() {
        let records: Vec<_> = [2024, 2023, 2024, 2022]
            .into_iter()
            .map(|year| record("A", year, 1, 1, 0))
            .collect();
        assert_eq!(available_years(&records), vec![2024, 2023, 2022]);
    }

    #[test]
    fn available_years_empty() {
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn summary_serializes_for_charts() {
        let value = serde_json::to_value(compute_summary(&[sample()], 2024, None)).unwrap();
        assert_eq!(value["totalPopulation"], 1000);
        assert_eq!(value["byGender"]["male"]["percentage"], 52.0);
        assert_eq!(value["byAgeGroup"]["child"]["count"], 250);
        assert_eq!(value["byJorong"][0]["jorongId"], "jrg-A");
        assert!(value["jorongId"].is_null());
    }
}
