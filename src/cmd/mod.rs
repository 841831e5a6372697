pub mod assess;
pub mod prompt;
