//! Shared test utilities for the staging2live workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each rebuild a staging/production pair. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`site`]: [`TestSite`](site::TestSite): temp staging and production
//!   trees plus a SQLite database holding both schemas

pub mod site;
