use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{DoseLabel, ScheduleError, VaccineCode};

/// Minimum spacing between consecutive doses when a vaccine declares none.
pub const DEFAULT_INTERVAL_DAYS: u32 = 21;

/// Reference entry for one vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineDefinition {
    pub code: VaccineCode,
    pub name: String,
    pub doses: Vec<DoseLabel>,
    #[serde(default)]
    pub interval_days: Option<u32>,
    #[serde(default)]
    pub restrictions: BTreeSet<VaccineCode>,
}

impl VaccineDefinition {
    pub fn new(code: &str, name: &str, doses: &[&str]) -> Self {
        Self {
            code: VaccineCode::new(code),
            name: name.to_string(),
            doses: doses.iter().copied().map(DoseLabel::from).collect(),
            interval_days: None,
            restrictions: BTreeSet::new(),
        }
    }

    pub fn with_interval(mut self, days: u32) -> Self {
        self.interval_days = Some(days);
        self
    }

    pub fn restricting(mut self, codes: &[&str]) -> Self {
        self.restrictions
            .extend(codes.iter().copied().map(VaccineCode::from));
        self
    }

    /// `"<code> - <name>"`, the form stored on administration records.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }

    pub fn has_dose(&self, dose: &DoseLabel) -> bool {
        self.doses.contains(dose)
    }
}

/// Immutable lookup table of every vaccine the clinic can administer.
#[derive(Debug, Clone)]
pub struct VaccineCatalog {
    entries: BTreeMap<VaccineCode, VaccineDefinition>,
    order: Vec<VaccineCode>,
    default_interval_days: u32,
    no_restrictions: BTreeSet<VaccineCode>,
}

impl VaccineCatalog {
    pub fn standard() -> Self {
        Self::from_definitions(standard_definitions())
    }

    /// Later definitions replace earlier ones with the same code.
    pub fn from_definitions(definitions: Vec<VaccineDefinition>) -> Self {
        let mut entries = BTreeMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            if !entries.contains_key(&definition.code) {
                order.push(definition.code.clone());
            }
            entries.insert(definition.code.clone(), definition);
        }

        let catalog = Self {
            entries,
            order,
            default_interval_days: DEFAULT_INTERVAL_DAYS,
            no_restrictions: BTreeSet::new(),
        };

        for (code, restricted) in catalog.asymmetric_restrictions() {
            warn!(
                %code,
                %restricted,
                "restriction declared in one direction only; the reverse pairing is not enforced"
            );
        }

        catalog
    }

    /// Copy of this catalog with custom entries appended (or replacing existing codes).
    pub fn extended_with(&self, extra: Vec<VaccineDefinition>) -> Self {
        let mut definitions: Vec<VaccineDefinition> = self.definitions().cloned().collect();
        definitions.extend(extra);
        Self::from_definitions(definitions)
    }

    pub fn definition(&self, code: &str) -> Result<&VaccineDefinition, ScheduleError> {
        self.entries
            .get(code)
            .ok_or_else(|| ScheduleError::UnknownVaccineCode(VaccineCode::new(code)))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn doses_for(&self, code: &str) -> Result<&[DoseLabel], ScheduleError> {
        self.definition(code)
            .map(|definition| definition.doses.as_slice())
    }

    pub fn interval_days(&self, code: &str) -> u32 {
        self.entries
            .get(code)
            .and_then(|definition| definition.interval_days)
            .unwrap_or(self.default_interval_days)
    }

    pub fn restrictions_for(&self, code: &str) -> &BTreeSet<VaccineCode> {
        self.entries
            .get(code)
            .map(|definition| &definition.restrictions)
            .unwrap_or(&self.no_restrictions)
    }

    pub fn display_label(&self, code: &str) -> Result<String, ScheduleError> {
        self.definition(code).map(VaccineDefinition::display_label)
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &VaccineDefinition> {
        self.order.iter().filter_map(|code| self.entries.get(code))
    }

    pub fn default_interval_days(&self) -> u32 {
        self.default_interval_days
    }

    /// `(a, b)` pairs where `a` restricts `b` but `b` does not declare `a`.
    pub fn asymmetric_restrictions(&self) -> Vec<(VaccineCode, VaccineCode)> {
        let mut missing = Vec::new();
        for definition in self.definitions() {
            for restricted in &definition.restrictions {
                if !self.restrictions_for(restricted.as_str()).contains(&definition.code) {
                    missing.push((definition.code.clone(), restricted.clone()));
                }
            }
        }
        missing
    }
}

impl Default for VaccineCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_definitions() -> Vec<VaccineDefinition> {
    vec![
        VaccineDefinition::new("B.C.G", "Bacillus Calmette-Guerin", &["single"]),
        VaccineDefinition::new(
            "O.P.V",
            "Oral Polio Vaccine",
            &["zero", "first", "second", "third", "booster"],
        )
        .with_interval(28),
        VaccineDefinition::new("Hep.B", "Hepatitis B", &["first", "second", "third"])
            .with_interval(28),
        VaccineDefinition::new(
            "HEXA",
            "Hexavalent (DTaP-IPV-Hib-HepB)",
            &["first", "second", "third"],
        )
        .with_interval(28),
        VaccineDefinition::new("ROTA", "Rotavirus", &["first", "second"]).with_interval(28),
        VaccineDefinition::new(
            "PCV.13",
            "Pneumococcal Conjugate 13",
            &["first", "second", "booster"],
        )
        .with_interval(28),
        VaccineDefinition::new("MENG.A+CY+W135", "Meningococcal ACWY", &["single"]),
        VaccineDefinition::new("M.M.R", "Measles, Mumps, Rubella", &["first", "second"])
            .with_interval(28)
            .restricting(&["Chicken pox"]),
        VaccineDefinition::new("Chicken pox", "Varicella", &["first", "second"])
            .with_interval(90)
            .restricting(&["M.M.R"]),
        VaccineDefinition::new("D.P.T", "Diphtheria, Pertussis, Tetanus", &["booster"]),
        VaccineDefinition::new("Hep.A", "Hepatitis A", &["first", "second"]).with_interval(180),
        VaccineDefinition::new("D.T", "Diphtheria, Tetanus (paediatric)", &["booster"])
            .restricting(&["Td"]),
        VaccineDefinition::new("Td", "Tetanus, diphtheria (adult)", &["first", "second"])
            .with_interval(28)
            .restricting(&["D.T"]),
        VaccineDefinition::new("HPV", "Human Papillomavirus", &["first", "second"])
            .with_interval(180),
    ]
}
