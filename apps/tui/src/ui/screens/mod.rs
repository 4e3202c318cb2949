pub mod browse;
pub mod detail;
pub mod help;
