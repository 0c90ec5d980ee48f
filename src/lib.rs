//! Parental leave planner for the Swedish parental insurance
//!
//! This crate computes parental benefit amounts, allocates each parent's
//! benefit days over the requested leave so the household stays above a
//! minimum combined income, and projects the result week by week for
//! charting and interactive adjustment.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
