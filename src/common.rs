pub mod coerce;
pub mod error;
pub mod i18n;
