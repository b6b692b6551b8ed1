use super::domain::VaccineCode;

/// A group of catch-up vaccines that becomes available at `from_months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationGroup {
    pub from_months: u32,
    pub codes: Vec<VaccineCode>,
}

/// Age-gated catch-up schedule. Groups only ever add codes as the child gets older.
#[derive(Debug, Clone)]
pub struct CompensationSchedule {
    groups: Vec<CompensationGroup>,
}

impl CompensationSchedule {
    pub fn standard() -> Self {
        Self::from_groups(vec![
            group(0, &["B.C.G", "O.P.V", "Hep.B"]),
            group(2, &["HEXA", "ROTA", "PCV.13"]),
            group(9, &["MENG.A+CY+W135"]),
            group(12, &["M.M.R", "Chicken pox"]),
            group(18, &["D.P.T", "Hep.A"]),
            group(72, &["D.T"]),
            group(144, &["Td", "HPV"]),
        ])
    }

    pub fn from_groups(mut groups: Vec<CompensationGroup>) -> Self {
        groups.sort_by_key(|group| group.from_months);
        Self { groups }
    }

    pub fn groups(&self) -> &[CompensationGroup] {
        &self.groups
    }

    /// Codes unlocked at or below `age_months`, in unlock order.
    pub fn eligible_for_compensation(&self, age_months: u32) -> Vec<VaccineCode> {
        let mut eligible: Vec<VaccineCode> = Vec::new();
        for group in self
            .groups
            .iter()
            .take_while(|group| group.from_months <= age_months)
        {
            for code in &group.codes {
                if !eligible.contains(code) {
                    eligible.push(code.clone());
                }
            }
        }
        eligible
    }

    pub fn is_eligible(&self, code: &str, age_months: u32) -> bool {
        self.groups
            .iter()
            .take_while(|group| group.from_months <= age_months)
            .any(|group| group.codes.iter().any(|candidate| candidate.as_str() == code))
    }
}

impl Default for CompensationSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

fn group(from_months: u32, codes: &[&str]) -> CompensationGroup {
    CompensationGroup {
        from_months,
        codes: codes.iter().copied().map(VaccineCode::from).collect(),
    }
}
