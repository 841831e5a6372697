use super::brackets::{self, TaxBracket};
use super::deductions::{compute_deductions, Deductions};
use super::error::{IncomeProblem, TaxError};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    /// Digits with at most one decimal point, e.g. `500000`, `1234.56`, `12.` or `.5`
    static ref INCOME_PATTERN: Regex = Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();
}

/// Employment category. Only affects which inputs are validated, tax is
/// computed the same way for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Government,
    Private,
    Contract,
}

impl Category {
    pub fn display(&self) -> &'static str {
        match self {
            Category::Government => "Government",
            Category::Private => "Private",
            Category::Contract => "Contract",
        }
    }

    /// Whether constructors for this category take an employee type
    pub fn accepts_employee_type(&self) -> bool {
        match self {
            Category::Government | Category::Private => true,
            Category::Contract => false,
        }
    }
}

impl FromStr for Category {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "government" => Ok(Category::Government),
            "private" => Ok(Category::Private),
            "contract" => Ok(Category::Contract),
            _ => Err(TaxError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Employee sub-type. Carried as a validated tag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmployeeType {
    #[default]
    Regular,
}

impl FromStr for EmployeeType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Regular" => Ok(EmployeeType::Regular),
            _ => Err(TaxError::InvalidEmployeeType(s.to_string())),
        }
    }
}

/// Parse income text as entered by the user.
///
/// Accepts the forms matched by `INCOME_PATTERN`. Signs, exponents and
/// separators are rejected, as is anything `Decimal` cannot hold exactly.
pub fn validate_income(value: &str) -> Result<Decimal, TaxError> {
    let value = value.trim();
    if !INCOME_PATTERN.is_match(value) {
        return Err(IncomeProblem::NotNumeric.into());
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };
    let income = Decimal::from_str(&normalized).map_err(|_| IncomeProblem::NotNumeric)?;
    // from_str rounds digits it cannot store, which lowers the scale
    if income.scale() as usize != fraction.len() {
        return Err(IncomeProblem::NotNumeric.into());
    }
    validate_positive(income)
}

/// Reject zero and negative incomes
pub fn validate_positive(income: Decimal) -> Result<Decimal, TaxError> {
    if income <= Decimal::ZERO {
        return Err(IncomeProblem::NotPositive.into());
    }
    Ok(income)
}

pub fn validate_category(value: &str) -> Result<Category, TaxError> {
    value.parse()
}

pub fn validate_employee_type(value: &str) -> Result<EmployeeType, TaxError> {
    value.parse()
}

/// An employee whose tax is being assessed
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: String,
    pub income: Decimal,
    pub category: Category,
    pub employee_type: EmployeeType,
    /// Populated by [`Employee::assess`], replaced on every call
    pub deductions: Deductions,
}

impl Employee {
    /// Create an employee of the given category as a regular employee
    pub fn new(name: &str, income: Decimal, category: Category) -> Result<Self, TaxError> {
        match category {
            Category::Government => Self::government(name, income, EmployeeType::Regular),
            Category::Private => Self::private(name, income, EmployeeType::Regular),
            Category::Contract => Self::contract(name, income),
        }
    }

    pub fn government(
        name: &str,
        income: Decimal,
        employee_type: EmployeeType,
    ) -> Result<Self, TaxError> {
        Self::build(name, income, Category::Government, employee_type)
    }

    pub fn private(
        name: &str,
        income: Decimal,
        employee_type: EmployeeType,
    ) -> Result<Self, TaxError> {
        Self::build(name, income, Category::Private, employee_type)
    }

    pub fn contract(name: &str, income: Decimal) -> Result<Self, TaxError> {
        Self::build(name, income, Category::Contract, EmployeeType::Regular)
    }

    /// Create an employee from raw category and employee type text
    pub fn parse(
        name: &str,
        income: Decimal,
        category: &str,
        employee_type: Option<&str>,
    ) -> Result<Self, TaxError> {
        let category = validate_category(category)?;
        let employee_type = match employee_type {
            Some(t) if category.accepts_employee_type() => validate_employee_type(t)?,
            Some(t) => return Err(TaxError::InvalidEmployeeType(t.to_string())),
            None => EmployeeType::Regular,
        };
        Self::build(name, income, category, employee_type)
    }

    fn build(
        name: &str,
        income: Decimal,
        category: Category,
        employee_type: EmployeeType,
    ) -> Result<Self, TaxError> {
        let income = validate_positive(income)?;
        Ok(Employee {
            name: name.to_string(),
            income,
            category,
            employee_type,
            deductions: Deductions::default(),
        })
    }

    /// Recalculate deductions and tax for this employee
    pub fn assess(&mut self) -> Assessment {
        self.deductions = compute_deductions(self.income);

        let taxable_income = brackets::taxable_income(self.income, &self.deductions);
        let (bracket_index, bracket) = brackets::bracket_for(taxable_income);
        let tax_before_surcharge = brackets::tax_on_taxable_income(taxable_income);
        let tax = brackets::apply_surcharge(tax_before_surcharge);

        log::info!(
            "Assessed {} ({}): income {}, tax {}",
            self.name,
            self.category,
            self.income,
            tax
        );

        Assessment {
            income: self.income,
            deductions: self.deductions.clone(),
            total_deductions: self.deductions.total(),
            taxable_income,
            bracket_index,
            bracket: *bracket,
            tax_before_surcharge,
            surcharge_applied: tax_before_surcharge >= brackets::SURCHARGE_THRESHOLD,
            tax,
        }
    }

    /// Tax payable. Recomputes deductions each time.
    pub fn calculate_tax(&mut self) -> Decimal {
        self.deductions = compute_deductions(self.income);
        brackets::compute_tax(self.income, &self.deductions)
    }
}

/// Result of assessing an employee's tax
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub income: Decimal,
    pub deductions: Deductions,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    /// Zero based position in the bracket table
    pub bracket_index: usize,
    pub bracket: TaxBracket,
    pub tax_before_surcharge: Decimal,
    pub surcharge_applied: bool,
    pub tax: Decimal,
}

impl Assessment {
    pub fn surcharge(&self) -> Decimal {
        self.tax - self.tax_before_surcharge
    }
}
