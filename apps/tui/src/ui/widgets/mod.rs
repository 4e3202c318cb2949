pub mod popup;
pub mod tables;
