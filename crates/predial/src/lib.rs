//! Property-tax ("predial") portfolio analytics.
//!
//! The crate turns an uploaded tabular export into a canonical
//! [`workflows::predial::PropertyTable`], then derives the compliance,
//! delinquency, cadastral, collection, scenario and risk views for any
//! filter selection through [`workflows::predial::analyze`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
