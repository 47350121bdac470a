// src/sheets/mod.rs

pub mod badges;
pub mod csv;
pub mod dates;
pub mod definitions;
pub mod error;
pub mod fetcher;
pub mod filters;
pub mod store;
pub mod views;

pub use definitions::{Domain, ParsedSheet, Record};
pub use error::SheetError;
pub use fetcher::HttpSheetFetcher;
pub use store::{DashboardStore, DomainState};
