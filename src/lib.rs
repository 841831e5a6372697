//! Employee income tax calculator
//!
//! Deductions, the bracket table and the surcharge live in [`tax`]; the
//! interactive session that collects employee details lives in [`cmd`].

pub mod cmd;
pub mod tax;
