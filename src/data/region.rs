use std::fmt;

// ---------------------------------------------------------------------------
// Region – the five Brazilian macro-regions
// ---------------------------------------------------------------------------

/// Macro-region of a federative unit.  `Other` is the fallback for names
/// that are not in the table and carries code 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
    Other,
}

/// State membership per region.  Names must match the dataset exactly.
const REGION_TABLE: [(Region, &[&str]); 5] = [
    (
        Region::Norte,
        &["Amazonas", "Roraima", "Amapá", "Pará", "Tocantins", "Rondônia", "Acre"],
    ),
    (
        Region::Nordeste,
        &[
            "Maranhão",
            "Piauí",
            "Ceará",
            "Rio Grande do Norte",
            "Paraíba",
            "Pernambuco",
            "Alagoas",
            "Sergipe",
            "Bahia",
        ],
    ),
    (
        Region::CentroOeste,
        &["Mato Grosso", "Mato Grosso do Sul", "Goiás", "Distrito Federal"],
    ),
    (
        Region::Sudeste,
        &["São Paulo", "Rio de Janeiro", "Espírito Santo", "Minas Gerais"],
    ),
    (Region::Sul, &["Paraná", "Rio Grande do Sul", "Santa Catarina"]),
];

impl Region {
    /// The fixed regions in code order (excludes `Other`).
    pub const ALL: [Region; 5] = [
        Region::Norte,
        Region::Nordeste,
        Region::CentroOeste,
        Region::Sudeste,
        Region::Sul,
    ];

    /// Display name, as stored in the `Regiao` column.
    pub fn name(self) -> &'static str {
        match self {
            Region::Norte => "Norte",
            Region::Nordeste => "Nordeste",
            Region::CentroOeste => "Centro-Oeste",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
            Region::Other => "Outra",
        }
    }

    /// Numeric code used as the `Regiao_Cod` model feature.
    pub fn code(self) -> u8 {
        region_code(self.name())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a state name to its region, `Region::Other` when unknown.
pub fn classify_region(state: &str) -> Region {
    REGION_TABLE
        .iter()
        .find(|(_, states)| states.contains(&state))
        .map(|(region, _)| *region)
        .unwrap_or(Region::Other)
}

/// Map a region name to its code in 1..=5, or 0 for anything else.
pub fn region_code(region_name: &str) -> u8 {
    match region_name {
        "Norte" => 1,
        "Nordeste" => 2,
        "Centro-Oeste" => 3,
        "Sudeste" => 4,
        "Sul" => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [&str; 27] = [
        "Acre",
        "Alagoas",
        "Amapá",
        "Amazonas",
        "Bahia",
        "Ceará",
        "Distrito Federal",
        "Espírito Santo",
        "Goiás",
        "Maranhão",
        "Mato Grosso",
        "Mato Grosso do Sul",
        "Minas Gerais",
        "Pará",
        "Paraíba",
        "Paraná",
        "Pernambuco",
        "Piauí",
        "Rio de Janeiro",
        "Rio Grande do Norte",
        "Rio Grande do Sul",
        "Rondônia",
        "Roraima",
        "Santa Catarina",
        "São Paulo",
        "Sergipe",
        "Tocantins",
    ];

    #[test]
    fn every_state_lands_in_exactly_one_fixed_region() {
        for state in ALL_STATES {
            let region = classify_region(state);
            assert_ne!(region, Region::Other, "{state} fell back to Outra");
            let owners = REGION_TABLE
                .iter()
                .filter(|(_, states)| states.contains(&state))
                .count();
            assert_eq!(owners, 1, "{state} listed in {owners} regions");
        }
        let total: usize = REGION_TABLE.iter().map(|(_, states)| states.len()).sum();
        assert_eq!(total, ALL_STATES.len());
    }

    #[test]
    fn unknown_names_fall_back_to_other() {
        for name in ["", "Atlantis", "bahia", "Sao Paulo", " Bahia", "Nordeste"] {
            assert_eq!(classify_region(name), Region::Other, "{name:?}");
        }
    }

    #[test]
    fn spot_checks() {
        assert_eq!(classify_region("Bahia"), Region::Nordeste);
        assert_eq!(classify_region("Distrito Federal"), Region::CentroOeste);
        assert_eq!(classify_region("Rondônia"), Region::Norte);
        assert_eq!(classify_region("Espírito Santo"), Region::Sudeste);
        assert_eq!(classify_region("Santa Catarina"), Region::Sul);
    }

    #[test]
    fn fixed_regions_have_codes_one_to_five() {
        let codes: Vec<u8> = Region::ALL.iter().map(|r| region_code(r.name())).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn region_code_is_total() {
        assert_eq!(region_code("Outra"), 0);
        assert_eq!(region_code(""), 0);
        assert_eq!(region_code("sul"), 0);
        assert_eq!(region_code("Centro Oeste"), 0);
    }

    // Code 0 is both the "Outra" fallback and a value the model may have
    // seen during training; the selector never offers it.
    #[test]
    fn other_code_is_zero_and_not_selectable() {
        assert_eq!(Region::Other.code(), 0);
        assert!(!Region::ALL.contains(&Region::Other));
        assert!(Region::ALL.iter().all(|r| r.code() != 0));
    }
}
