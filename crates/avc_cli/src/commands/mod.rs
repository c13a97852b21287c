pub mod check;
pub mod sum;
pub mod validate;
