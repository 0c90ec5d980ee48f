//! Configuration loading and management for the parental leave planner.
//!
//! This module provides functionality to load scheme configurations from YAML
//! files: scheme metadata, benefit rates, day balances and family presets.
//!
//! # Example
//!
//! ```no_run
//! use parental_leave_planner::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sweden").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllocationConfig, BenefitConfig, BenefitsFile, ChildAllowanceConfig, DayAllotment, DayConfig,
    DaysFile, ExhaustionPolicy, RateConfig, SchemeMetadata, SupplementConfig, SupplementMonths,
    SupplementPolicy,
};
