//! Party-affiliation analysis of contribution records.
//!
//! This module joins contributions to committee party lookups, rolls them
//! up per person, labels each person with the party that received at least
//! 60% of their giving, and ranks recipient committees.

pub mod analyzer;
pub mod classify;
pub mod committees;
pub mod contributors;
pub mod enrich;
pub mod transactions;
pub mod types;
pub mod utility;
