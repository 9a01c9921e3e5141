use std::cmp::Ordering;

use super::model::{Dataset, Indicator, Record};

// ---------------------------------------------------------------------------
// Year filter and per-year aggregates
// ---------------------------------------------------------------------------

/// Records for `year`, in file order.  Empty when the year is absent.
pub fn rows_for_year(dataset: &Dataset, year: i32) -> Vec<&Record> {
    dataset.records.iter().filter(|r| r.ano == year).collect()
}

/// Mean of `indicator` over `rows`, ignoring records without a value.
/// `None` if no record has one.
pub fn mean(rows: &[&Record], indicator: Indicator) -> Option<f64> {
    let (sum, n) = rows
        .iter()
        .filter_map(|r| r.get(indicator))
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Rows sorted ascending by `indicator`; rows without a value go last.
pub fn ranking<'a>(rows: &[&'a Record], indicator: Indicator) -> Vec<&'a Record> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| match (a.get(indicator), b.get(indicator)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Headline numbers for the overview tab.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub mortality_mean: Option<f64>,
    pub idhm_mean: Option<f64>,
    pub beds_mean: Option<f64>,
    pub state_count: usize,
}

impl YearSummary {
    pub fn compute(dataset: &Dataset, year: i32) -> Self {
        let rows = rows_for_year(dataset, year);
        YearSummary {
            year,
            mortality_mean: mean(&rows, Indicator::MortalidadeAdultosIdosos),
            idhm_mean: mean(&rows, Indicator::Idhm),
            beds_mean: mean(&rows, Indicator::LeitosSus),
            state_count: rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;

    fn rec(estado: &str, ano: i32, mortality: Option<f64>) -> Record {
        let mut indicators = BTreeMap::new();
        if let Some(m) = mortality {
            indicators.insert(Indicator::MortalidadeAdultosIdosos, m);
        }
        indicators.insert(Indicator::Idhm, 0.7);
        Record::new(estado.into(), ano, indicators, BTreeMap::new())
    }

    fn dataset(records: Vec<Record>) -> Dataset {
        Dataset::new(records, vec!["Estado".into(), "ano".into()], PathBuf::from("mem.csv"))
    }

    #[test]
    fn filter_by_present_and_absent_year() {
        let ds = dataset(vec![
            rec("Acre", 2020, Some(1.0)),
            rec("Pará", 2020, Some(2.0)),
            rec("Bahia", 2020, Some(3.0)),
        ]);
        assert_eq!(rows_for_year(&ds, 2020).len(), 3);
        assert!(rows_for_year(&ds, 2019).is_empty());
    }

    #[test]
    fn mean_skips_missing_values() {
        let ds = dataset(vec![
            rec("Acre", 2020, Some(4.0)),
            rec("Pará", 2020, None),
            rec("Bahia", 2020, Some(8.0)),
        ]);
        let rows = rows_for_year(&ds, 2020);
        assert_eq!(mean(&rows, Indicator::MortalidadeAdultosIdosos), Some(6.0));
        assert_eq!(mean(&rows, Indicator::Gini), None);
        assert_eq!(mean(&[], Indicator::Idhm), None);
    }

    #[test]
    fn ranking_is_ascending_with_missing_last() {
        let ds = dataset(vec![
            rec("Acre", 2020, Some(9.0)),
            rec("Pará", 2020, None),
            rec("Bahia", 2020, Some(1.5)),
        ]);
        let rows = rows_for_year(&ds, 2020);
        let order: Vec<&str> = ranking(&rows, Indicator::MortalidadeAdultosIdosos)
            .iter()
            .map(|r| r.estado.as_str())
            .collect();
        assert_eq!(order, vec!["Bahia", "Acre", "Pará"]);
    }

    #[test]
    fn summary_for_year() {
        let ds = dataset(vec![
            rec("Acre", 2020, Some(4.0)),
            rec("Bahia", 2020, Some(8.0)),
            rec("Bahia", 2019, Some(100.0)),
        ]);
        let s = YearSummary::compute(&ds, 2020);
        assert_eq!(s.state_count, 2);
        assert_eq!(s.mortality_mean, Some(6.0));
        assert!((s.idhm_mean.unwrap() - 0.7).abs() < 1e-12);
        assert_eq!(s.beds_mean, None);
    }
}
