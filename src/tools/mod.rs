//! Standalone calculators and converters. Each submodule is a set of pure
//! functions; nothing here keeps state between calls.

pub mod finance;
pub mod health;
pub mod pdf;
pub mod text;
