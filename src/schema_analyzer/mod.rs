// Schema analyzer module: per-column SQL type inference
pub mod type_inference;

#[cfg(test)]
mod tests;

pub use type_inference::{is_boolean, is_date, is_decimal, is_integer, TypeInferrer};
