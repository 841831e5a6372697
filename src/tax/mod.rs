pub mod brackets;
pub mod deductions;
pub mod employee;
pub mod error;

pub use brackets::{compute_tax, TaxBracket, BRACKETS};
pub use deductions::{compute_deductions, Deduction, Deductions};
pub use employee::{
    validate_category, validate_employee_type, validate_income, Assessment, Category, Employee,
    EmployeeType,
};
pub use error::{IncomeProblem, TaxError};
