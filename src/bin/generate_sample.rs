//! Writes a synthetic dataset and a matching linear model artifact so the
//! dashboard can be run without the offline notebook outputs.
//!
//! ```text
//! cargo run --bin generate_sample [root]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

const YEARS: [i32; 5] = [2017, 2018, 2019, 2020, 2021];

/// (state, region code, base IDHM, population)
const STATES: [(&str, u8, f64, i64); 27] = [
    ("Acre", 1, 0.66, 906_876),
    ("Amapá", 1, 0.70, 877_613),
    ("Amazonas", 1, 0.67, 4_269_995),
    ("Pará", 1, 0.65, 8_777_124),
    ("Rondônia", 1, 0.69, 1_815_278),
    ("Roraima", 1, 0.71, 652_713),
    ("Tocantins", 1, 0.70, 1_607_363),
    ("Alagoas", 2, 0.63, 3_365_351),
    ("Bahia", 2, 0.66, 14_985_284),
    ("Ceará", 2, 0.68, 9_240_580),
    ("Maranhão", 2, 0.64, 7_153_262),
    ("Paraíba", 2, 0.66, 4_059_905),
    ("Pernambuco", 2, 0.67, 9_674_793),
    ("Piauí", 2, 0.65, 3_289_290),
    ("Rio Grande do Norte", 2, 0.68, 3_560_903),
    ("Sergipe", 2, 0.67, 2_338_474),
    ("Distrito Federal", 3, 0.82, 3_094_325),
    ("Goiás", 3, 0.74, 7_206_589),
    ("Mato Grosso", 3, 0.73, 3_567_234),
    ("Mato Grosso do Sul", 3, 0.73, 2_839_188),
    ("Espírito Santo", 4, 0.74, 4_108_508),
    ("Minas Gerais", 4, 0.73, 21_411_923),
    ("Rio de Janeiro", 4, 0.76, 17_463_349),
    ("São Paulo", 4, 0.78, 46_649_132),
    ("Paraná", 5, 0.75, 11_597_484),
    ("Rio Grande do Sul", 5, 0.75, 11_466_630),
    ("Santa Catarina", 5, 0.77, 7_338_473),
];

const FEATURES: [&str; 6] = ["IDHM", "Gini", "Leitos_SUS|10k", "%_Fumantes", "PIB_%", "Regiao_Cod"];
const COEFFICIENTS: [f64; 6] = [-180.0, 60.0, 0.9, -0.6, -1.2, 4.5];
const INTERCEPT: f64 = 210.0;
const TARGET_FILE: &str = "modelo_taxa_mortes_isquemicas_adultos_idosos_por_100k.json";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// `0.66` → `"0,660"`
fn comma(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}").replace('.', ",")
}

fn write_dataset(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record([
        "Estado",
        "ano",
        "IDHM",
        "Gini",
        "Leitos_SUS|10k",
        "%_Fumantes",
        "PIB_%",
        "Taxa_Mortes_Isquemicas_Total_por_100k",
        "Taxa_Mortes_Isquemicas_Adultos_Idosos_por_100k",
        "Populacao",
    ])?;

    let mut rows = 0;
    for (estado, region_code, base_idhm, population) in STATES {
        for (i, &year) in YEARS.iter().enumerate() {
            let idhm = (base_idhm + 0.004 * i as f64 + rng.gauss(0.0, 0.005)).clamp(0.5, 0.9);
            let gini = rng.gauss(0.52, 0.04).clamp(0.3, 0.7);
            let beds = (8.0 + 20.0 * (idhm - 0.6) + rng.gauss(10.0, 3.0)).max(0.0);
            let smoking = (6.0 + 30.0 * (idhm - 0.6) + rng.gauss(4.0, 1.5)).clamp(5.0, 25.0);
            let gdp = rng.gauss(1.0, 2.0).clamp(-5.0, 5.0);

            let features = [idhm, gini, beds, smoking, gdp, f64::from(region_code)];
            let adult = INTERCEPT
                + COEFFICIENTS
                    .iter()
                    .zip(features)
                    .map(|(c, x)| c * x)
                    .sum::<f64>()
                + rng.gauss(0.0, 4.0);
            let total = adult * 0.45 + rng.gauss(0.0, 2.0);

            writer.write_record([
                estado.to_string(),
                year.to_string(),
                comma(idhm, 3),
                comma(gini, 3),
                comma(beds, 1),
                comma(smoking, 1),
                comma(gdp, 2),
                comma(total, 2),
                comma(adult, 2),
                population.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_model(path: &Path) -> Result<()> {
    let model = json!({
        "kind": "linear",
        "feature_names": FEATURES,
        "coefficients": COEFFICIENTS,
        "intercept": INTERCEPT,
    });
    let text = serde_json::to_string_pretty(&model)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let root = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let data_dir = root.join("dados/saidas_1_parte");
    let model_dir = root.join("modelos");
    std::fs::create_dir_all(&data_dir).context("creating data directory")?;
    std::fs::create_dir_all(&model_dir).context("creating model directory")?;

    let mut rng = SimpleRng::new(42);
    let data_path = data_dir.join("dataset_final_tratado.csv");
    let rows = write_dataset(&data_path, &mut rng)?;
    println!(
        "Wrote {rows} rows ({} states x {} years) to {}",
        STATES.len(),
        YEARS.len(),
        data_path.display()
    );

    let model_path = model_dir.join(TARGET_FILE);
    write_model(&model_path)?;
    println!("Wrote linear model to {}", model_path.display());
    Ok(())
}
