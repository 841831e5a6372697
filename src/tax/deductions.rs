use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Education allowance is capped at this amount
pub const EDUCATION_ALLOWANCE_CAP: Decimal = dec!(350000);
/// Share of income claimable as education allowance, before the cap
pub const EDUCATION_ALLOWANCE_RATE: Decimal = dec!(0.10);
/// Share of income deducted as other deductions
pub const OTHER_DEDUCTION_RATE: Decimal = dec!(0.05);

/// Deduction kinds, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Deduction {
    /// National Pension and Provident Fund
    Nppf,
    /// Group Insurance Scheme
    Gis,
    EducationAllowance,
    Other,
}

impl Deduction {
    pub const ALL: [Deduction; 4] = [
        Deduction::Nppf,
        Deduction::Gis,
        Deduction::EducationAllowance,
        Deduction::Other,
    ];

    /// Display name as shown to the user
    pub fn display(&self) -> &'static str {
        match self {
            Deduction::Nppf => "NPPF",
            Deduction::Gis => "GIS",
            Deduction::EducationAllowance => "Education Allowance",
            Deduction::Other => "Other",
        }
    }

    /// Amount of this deduction for the given income
    pub fn amount_for(&self, income: Decimal) -> Decimal {
        match self {
            Deduction::Nppf | Deduction::Gis => Decimal::ZERO,
            Deduction::EducationAllowance => {
                EDUCATION_ALLOWANCE_CAP.min(income * EDUCATION_ALLOWANCE_RATE)
            }
            Deduction::Other => income * OTHER_DEDUCTION_RATE,
        }
    }
}

impl std::fmt::Display for Deduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Deduction amounts keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions(BTreeMap<Deduction, Decimal>);

impl Deductions {
    pub fn get(&self, deduction: Deduction) -> Decimal {
        self.0.get(&deduction).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Deduction, Decimal)> + '_ {
        self.0.iter().map(|(d, amount)| (*d, *amount))
    }
}

impl FromIterator<(Deduction, Decimal)> for Deductions {
    fn from_iter<I: IntoIterator<Item = (Deduction, Decimal)>>(iter: I) -> Self {
        Deductions(iter.into_iter().collect())
    }
}

/// Calculate all deductions for an income. Always yields every deduction kind.
pub fn compute_deductions(income: Decimal) -> Deductions {
    let deductions: Deductions = Deduction::ALL
        .iter()
        .map(|d| (*d, d.amount_for(income)))
        .collect();
    log::debug!(
        "Deductions for income {}: total {}",
        income,
        deductions.total()
    );
    deductions
}
