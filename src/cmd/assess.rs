//! Assess command - interactive tax calculation for a single employee

use crate::cmd::prompt::{parse_name, InputError, Prompter};
use crate::tax::{validate_category, validate_income, Assessment, Employee};
use clap::Args;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

pub const NAME_PROMPT: &str = "Enter employee name: ";
pub const INCOME_PROMPT: &str = "Enter employee income: ";
pub const CATEGORY_PROMPT: &str = "Enter employee type (Government/Private/Contract): ";

#[derive(Args, Debug, Default)]
pub struct AssessCommand {
    /// Show deductions, bracket and surcharge after the summary
    #[arg(short, long)]
    breakdown: bool,

    /// Also print the assessment as JSON
    #[arg(long)]
    json: bool,
}

/// Row for the breakdown table
#[derive(Debug, Clone, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl BreakdownRow {
    fn new(item: impl Into<String>, amount: impl Into<String>) -> Self {
        BreakdownRow {
            item: item.into(),
            amount: amount.into(),
        }
    }
}

/// Assessment data for JSON output
#[derive(Debug, Serialize)]
struct AssessmentData {
    name: String,
    category: String,
    income: String,
    deductions: Vec<DeductionData>,
    total_deductions: String,
    taxable_income: String,
    bracket: String,
    tax_before_surcharge: String,
    surcharge_applied: bool,
    tax: String,
}

#[derive(Debug, Serialize)]
struct DeductionData {
    name: String,
    amount: String,
}

impl AssessCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        self.run(stdin.lock(), io::stdout())?;
        Ok(())
    }

    /// Collect employee details from `input`, then write the result to `output`
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> anyhow::Result<Assessment> {
        let mut prompter = Prompter::new(input, output);
        let mut employee = collect_employee(&mut prompter)?;
        let assessment = employee.assess();

        let out = prompter.output();
        print_summary(out, &employee, &assessment)?;
        if self.breakdown {
            print_breakdown(out, &assessment)?;
        }
        if self.json {
            print_json(out, &employee, &assessment)?;
        }
        out.flush()?;
        Ok(assessment)
    }
}

/// Prompt for name, income and category, re-asking only the field that failed
pub fn collect_employee<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Employee> {
    let name = prompter.ask(NAME_PROMPT, parse_name)?;
    let income = prompter.ask(INCOME_PROMPT, |s| {
        validate_income(s).map_err(InputError::from)
    })?;
    let category = prompter.ask(CATEGORY_PROMPT, |s| {
        validate_category(s).map_err(InputError::from)
    })?;
    log::debug!("Collected employee {} ({}), income {}", name, category, income);

    Ok(Employee::new(&name, income, category)?)
}

fn print_summary<W: Write>(
    out: &mut W,
    employee: &Employee,
    assessment: &Assessment,
) -> io::Result<()> {
    let tax = format_amount(assessment.tax);
    writeln!(
        out,
        "Employee: {}, Income: {}, Tax: {}",
        employee.name,
        format_amount(employee.income),
        tax
    )?;
    writeln!(
        out,
        "{}'s total tax payable is {}. Thank you for using our service.",
        employee.name, tax
    )
}

fn print_breakdown<W: Write>(out: &mut W, assessment: &Assessment) -> io::Result<()> {
    let mut rows = vec![BreakdownRow::new("Income", format_amount(assessment.income))];
    rows.extend(
        assessment
            .deductions
            .iter()
            .map(|(d, amount)| BreakdownRow::new(format!("  {}", d), format_amount(amount))),
    );
    rows.push(BreakdownRow::new(
        "Total Deductions",
        format_amount(assessment.total_deductions),
    ));
    rows.push(BreakdownRow::new(
        "Taxable Income",
        format_amount(assessment.taxable_income),
    ));
    rows.push(BreakdownRow::new("Bracket", describe_bracket(assessment)));
    rows.push(BreakdownRow::new(
        "Tax Before Surcharge",
        format_amount(assessment.tax_before_surcharge),
    ));
    rows.push(BreakdownRow::new(
        "Surcharge",
        format_amount(assessment.surcharge()),
    ));
    rows.push(BreakdownRow::new("Tax Payable", format_amount(assessment.tax)));

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    writeln!(out)?;
    writeln!(out, "{}", table)
}

fn print_json<W: Write>(
    out: &mut W,
    employee: &Employee,
    assessment: &Assessment,
) -> anyhow::Result<()> {
    let data = AssessmentData {
        name: employee.name.clone(),
        category: employee.category.to_string(),
        income: format_amount(assessment.income),
        deductions: assessment
            .deductions
            .iter()
            .map(|(d, amount)| DeductionData {
                name: d.to_string(),
                amount: format_amount(amount),
            })
            .collect(),
        total_deductions: format_amount(assessment.total_deductions),
        taxable_income: format_amount(assessment.taxable_income),
        bracket: describe_bracket(assessment),
        tax_before_surcharge: format_amount(assessment.tax_before_surcharge),
        surcharge_applied: assessment.surcharge_applied,
        tax: format_amount(assessment.tax),
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
    Ok(())
}

fn describe_bracket(assessment: &Assessment) -> String {
    format!(
        "{}: {} @ {:.0}%",
        assessment.bracket_index + 1,
        assessment.bracket.display_range(),
        assessment.bracket.rate * dec!(100)
    )
}

/// Half-cent and above rounds up, away from zero
fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
