pub mod kernel;
pub mod strategy;
