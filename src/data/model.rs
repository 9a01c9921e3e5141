use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::region::{Region, classify_region, region_code};

// ---------------------------------------------------------------------------
// Indicator – the numeric columns that get decimal-comma cleanup
// ---------------------------------------------------------------------------

/// Health and economic indicators stored as `f64` on every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    Idhm,
    Gini,
    LeitosSus,
    Fumantes,
    Pib,
    MortalidadeTotal,
    MortalidadeAdultosIdosos,
}

impl Indicator {
    pub const ALL: [Indicator; 7] = [
        Indicator::Idhm,
        Indicator::Gini,
        Indicator::LeitosSus,
        Indicator::Fumantes,
        Indicator::Pib,
        Indicator::MortalidadeTotal,
        Indicator::MortalidadeAdultosIdosos,
    ];

    /// Header name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Indicator::Idhm => "IDHM",
            Indicator::Gini => "Gini",
            Indicator::LeitosSus => "Leitos_SUS|10k",
            Indicator::Fumantes => "%_Fumantes",
            Indicator::Pib => "PIB_%",
            Indicator::MortalidadeTotal => "Taxa_Mortes_Isquemicas_Total_por_100k",
            Indicator::MortalidadeAdultosIdosos => {
                "Taxa_Mortes_Isquemicas_Adultos_Idosos_por_100k"
            }
        }
    }

    pub fn from_column(name: &str) -> Option<Indicator> {
        Indicator::ALL.into_iter().find(|i| i.column() == name)
    }
}

// ---------------------------------------------------------------------------
// CellValue – a loosely typed cell for the remaining columns
// ---------------------------------------------------------------------------

/// Value of a column outside the fixed indicator set (e.g. `Populacao`).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Guess the type of a raw cell: integer, then float, then text.
    pub fn guess(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one state in one year
// ---------------------------------------------------------------------------

/// One row of the dataset.
#[derive(Debug, Clone)]
pub struct Record {
    pub estado: String,
    pub ano: i32,
    /// Cleaned indicator values; a missing cell has no entry.
    pub indicators: BTreeMap<Indicator, f64>,
    /// Every other column, keyed by header name.
    pub extra: BTreeMap<String, CellValue>,
    region: Region,
    region_code: u8,
}

impl Record {
    /// Region name and code are both derived from `estado` here and nowhere else.
    pub fn new(
        estado: String,
        ano: i32,
        indicators: BTreeMap<Indicator, f64>,
        extra: BTreeMap<String, CellValue>,
    ) -> Self {
        let region = classify_region(&estado);
        let region_code = region_code(region.name());
        Record {
            estado,
            ano,
            indicators,
            extra,
            region,
            region_code,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn region_code(&self) -> u8 {
        self.region_code
    }

    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        self.indicators.get(&indicator).copied()
    }

    /// `Populacao`, when present and numeric.
    pub fn population(&self) -> Option<f64> {
        self.extra.get("Populacao").and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// The parsed dataset. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Header order of the source file followed by `Regiao`, `Regiao_Cod`.
    pub columns: Vec<String>,
    /// File the records were read from.
    pub source: PathBuf,
}

impl Dataset {
    pub fn new(records: Vec<Record>, mut columns: Vec<String>, source: PathBuf) -> Self {
        for derived in ["Regiao", "Regiao_Cod"] {
            if !columns.iter().any(|c| c == derived) {
                columns.push(derived.to_string());
            }
        }
        Dataset {
            records,
            columns,
            source,
        }
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.ano).collect();
        years.into_iter().rev().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(estado: &str, ano: i32) -> Record {
        Record::new(estado.to_string(), ano, BTreeMap::new(), BTreeMap::new())
    }

    #[test]
    fn region_fields_follow_state_name() {
        let r = record("Paraná", 2019);
        assert_eq!(r.region(), Region::Sul);
        assert_eq!(r.region_code(), 5);

        let unknown = record("Guanabara", 1970);
        assert_eq!(unknown.region(), Region::Other);
        assert_eq!(unknown.region_code(), 0);
    }

    #[test]
    fn region_is_stable_across_years() {
        let codes: BTreeSet<u8> = (2015..2021).map(|y| record("Ceará", y).region_code()).collect();
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let ds = Dataset::new(
            vec![record("Acre", 2019), record("Acre", 2021), record("Pará", 2019)],
            vec!["Estado".into(), "ano".into()],
            PathBuf::from("mem.csv"),
        );
        assert_eq!(ds.years(), vec![2021, 2019]);
        assert_eq!(ds.columns, vec!["Estado", "ano", "Regiao", "Regiao_Cod"]);
    }

    #[test]
    fn cell_guessing() {
        assert_eq!(CellValue::guess("211755692"), CellValue::Integer(211_755_692));
        assert_eq!(CellValue::guess("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::guess("1,5"), CellValue::Text("1,5".into()));
        assert_eq!(CellValue::guess(""), CellValue::Null);
    }

    #[test]
    fn indicator_columns_round_trip() {
        for ind in Indicator::ALL {
            assert_eq!(Indicator::from_column(ind.column()), Some(ind));
        }
        assert_eq!(Indicator::from_column("Populacao"), None);
    }
}
