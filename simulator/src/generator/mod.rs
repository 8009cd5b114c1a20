pub mod catalog;
pub mod scenarios;
