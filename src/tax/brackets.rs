use super::deductions::Deductions;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tax at or above this amount attracts the surcharge
pub const SURCHARGE_THRESHOLD: Decimal = dec!(1000000);
/// Multiplier applied to the whole tax once the threshold is reached
pub const SURCHARGE_MULTIPLIER: Decimal = dec!(1.10);

/// A band of taxable income with its marginal rate.
///
/// Tax within the bracket is `(taxable - lower) * rate + base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Inclusive upper bound, `None` for the top bracket
    pub upper: Option<Decimal>,
    pub lower: Decimal,
    pub rate: Decimal,
    /// Tax accrued on everything below `lower`
    pub base: Decimal,
}

impl TaxBracket {
    const fn new(upper: Option<Decimal>, lower: Decimal, rate: Decimal, base: Decimal) -> Self {
        TaxBracket {
            upper,
            lower,
            rate,
            base,
        }
    }

    pub fn contains(&self, taxable: Decimal) -> bool {
        self.upper.is_none_or(|upper| taxable <= upper)
    }

    pub fn tax_on(&self, taxable: Decimal) -> Decimal {
        if self.rate.is_zero() {
            return self.base;
        }
        (taxable - self.lower) * self.rate + self.base
    }

    /// Display the range covered, e.g. "300,001 - 400,000"
    pub fn display_range(&self) -> String {
        match self.upper {
            Some(upper) if self.lower.is_zero() => format!("up to {}", upper),
            Some(upper) => format!("{} - {}", self.lower, upper),
            None => format!("over {}", self.lower),
        }
    }
}

/// Income tax brackets, checked in order. Boundaries belong to the lower bracket.
pub const BRACKETS: [TaxBracket; 6] = [
    TaxBracket::new(Some(dec!(300000)), dec!(0), dec!(0), dec!(0)),
    TaxBracket::new(Some(dec!(400000)), dec!(300000), dec!(0.10), dec!(0)),
    TaxBracket::new(Some(dec!(650000)), dec!(400000), dec!(0.15), dec!(10000)),
    TaxBracket::new(Some(dec!(1000000)), dec!(650000), dec!(0.20), dec!(35000)),
    TaxBracket::new(Some(dec!(1500000)), dec!(1000000), dec!(0.25), dec!(75000)),
    TaxBracket::new(None, dec!(1500000), dec!(0.30), dec!(125000)),
];

/// Find the first bracket whose upper bound covers the taxable income.
/// Negative taxable income falls into the first (zero rate) bracket.
pub fn bracket_for(taxable: Decimal) -> (usize, &'static TaxBracket) {
    BRACKETS
        .iter()
        .enumerate()
        .find(|(_, bracket)| bracket.contains(taxable))
        .unwrap_or((BRACKETS.len() - 1, &BRACKETS[BRACKETS.len() - 1]))
}

/// Tax from the bracket table alone, before any surcharge
pub fn tax_on_taxable_income(taxable: Decimal) -> Decimal {
    let (index, bracket) = bracket_for(taxable);
    let tax = bracket.tax_on(taxable);
    log::debug!(
        "Taxable income {} in bracket {} ({}): tax {}",
        taxable,
        index + 1,
        bracket.display_range(),
        tax
    );
    tax
}

/// Surcharge on high tax liability: the whole tax is uplifted by 10% once it
/// reaches the threshold.
pub fn apply_surcharge(tax: Decimal) -> Decimal {
    if tax >= SURCHARGE_THRESHOLD {
        log::debug!("Tax {} reaches surcharge threshold {}", tax, SURCHARGE_THRESHOLD);
        tax * SURCHARGE_MULTIPLIER
    } else {
        tax
    }
}

/// Income minus the sum of all deductions. May be negative.
pub fn taxable_income(income: Decimal, deductions: &Deductions) -> Decimal {
    income - deductions.total()
}

/// Calculate the final tax payable for an income and its deductions
pub fn compute_tax(income: Decimal, deductions: &Deductions) -> Decimal {
    let taxable = taxable_income(income, deductions);
    apply_surcharge(tax_on_taxable_income(taxable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::deductions::{compute_deductions, Deduction};

    #[test]
    fn zero_rate_up_to_300k() {
        assert_eq!(tax_on_taxable_income(dec!(0)), Decimal::ZERO);
        assert_eq!(tax_on_taxable_income(dec!(150000)), Decimal::ZERO);
        assert_eq!(tax_on_taxable_income(dec!(300000)), Decimal::ZERO);
    }

    #[test]
    fn just_above_300k() {
        assert_eq!(tax_on_taxable_income(dec!(300000.01)), dec!(0.001));
    }

    #[test]
    fn boundary_at_400k_stays_in_second_bracket() {
        assert_eq!(bracket_for(dec!(400000)).0, 1);
        assert_eq!(tax_on_taxable_income(dec!(400000)), dec!(10000));
    }

    #[test]
    fn brackets_are_contiguous() {
        for pair in BRACKETS.windows(2) {
            assert_eq!(pair[1].lower, pair[0].upper.unwrap());
        }
        assert!(BRACKETS[BRACKETS.len() - 1].upper.is_none());
    }

    #[test]
    fn bases_are_fixed_not_accumulated() {
        // Only the 400k boundary lines up; higher brackets restart from a fixed base
        assert_eq!(tax_on_taxable_income(dec!(650000)), dec!(47500));
        assert_eq!(tax_on_taxable_income(dec!(650000.01)), dec!(35000.002));
    }

    #[test]
    fn each_bracket() {
        assert_eq!(tax_on_taxable_income(dec!(350000)), dec!(5000));
        assert_eq!(tax_on_taxable_income(dec!(425000)), dec!(13750));
        assert_eq!(tax_on_taxable_income(dec!(650000)), dec!(47500));
        assert_eq!(tax_on_taxable_income(dec!(800000)), dec!(65000));
        assert_eq!(tax_on_taxable_income(dec!(1000000)), dec!(105000));
        assert_eq!(tax_on_taxable_income(dec!(1200000)), dec!(125000));
        assert_eq!(tax_on_taxable_income(dec!(1500000)), dec!(200000));
        assert_eq!(tax_on_taxable_income(dec!(2000000)), dec!(275000));
    }

    #[test]
    fn bracket_selection_at_boundaries() {
        assert_eq!(bracket_for(dec!(300000)).0, 0);
        assert_eq!(bracket_for(dec!(300000.01)).0, 1);
        assert_eq!(bracket_for(dec!(650000)).0, 2);
        assert_eq!(bracket_for(dec!(1000000)).0, 3);
        assert_eq!(bracket_for(dec!(1500000)).0, 4);
        assert_eq!(bracket_for(dec!(1500000.01)).0, 5);
    }

    #[test]
    fn negative_taxable_income_is_zero_rated() {
        assert_eq!(bracket_for(dec!(-5000)).0, 0);
        assert_eq!(tax_on_taxable_income(dec!(-5000)), Decimal::ZERO);

        let deductions: Deductions = [(Deduction::Other, dec!(1000))].into_iter().collect();
        assert_eq!(taxable_income(dec!(400), &deductions), dec!(-600));
        assert_eq!(compute_tax(dec!(400), &deductions), Decimal::ZERO);
    }

    #[test]
    fn surcharge_at_threshold() {
        assert_eq!(apply_surcharge(dec!(1000000)), dec!(1100000));
    }

    #[test]
    fn no_surcharge_below_threshold() {
        assert_eq!(apply_surcharge(dec!(999999.99)), dec!(999999.99));
    }

    #[test]
    fn surcharge_from_bracket_table() {
        // (4,500,000 - 1,500,000) * 0.30 + 125,000 = 1,025,000
        let raw = tax_on_taxable_income(dec!(4500000));
        assert_eq!(raw, dec!(1025000));
        assert_eq!(apply_surcharge(raw), dec!(1127500));

        // (4,416,000 - 1,500,000) * 0.30 + 125,000 = 999,800
        let raw = tax_on_taxable_income(dec!(4416000));
        assert_eq!(raw, dec!(999800));
        assert_eq!(apply_surcharge(raw), dec!(999800));
    }

    #[test]
    fn compute_tax_low_income() {
        let income = dec!(250000);
        assert_eq!(compute_tax(income, &compute_deductions(income)), Decimal::ZERO);
    }

    #[test]
    fn compute_tax_middle_income() {
        let income = dec!(500000);
        let deductions = compute_deductions(income);
        assert_eq!(taxable_income(income, &deductions), dec!(425000));
        assert_eq!(compute_tax(income, &deductions), dec!(13750));
    }

    #[test]
    fn compute_tax_with_surcharge() {
        // deductions 350,000 + 250,000, taxable 4,400,000
        // (4,400,000 - 1,500,000) * 0.30 + 125,000 = 995,000 -> below threshold
        let income = dec!(5000000);
        assert_eq!(compute_tax(income, &compute_deductions(income)), dec!(995000));

        // deductions 350,000 + 300,000, taxable 5,350,000
        // (5,350,000 - 1,500,000) * 0.30 + 125,000 = 1,280,000 -> 1,408,000
        let income = dec!(6000000);
        assert_eq!(compute_tax(income, &compute_deductions(income)), dec!(1408000));
    }

    #[test]
    fn compute_tax_is_idempotent() {
        let income = dec!(1234567.89);
        let deductions = compute_deductions(income);
        let first = compute_tax(income, &deductions);
        let second = compute_tax(income, &deductions);
        assert_eq!(first, second);
    }

    #[test]
    fn display_ranges() {
        assert_eq!(BRACKETS[0].display_range(), "up to 300000");
        assert_eq!(BRACKETS[1].display_range(), "300000 - 400000");
        assert_eq!(BRACKETS[5].display_range(), "over 1500000");
    }
}
