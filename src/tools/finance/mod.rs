pub mod debt;
pub mod vat;
