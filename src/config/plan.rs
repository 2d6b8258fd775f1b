//! Run plan loading from `taskstock.toml`
//!
//! The run plan says how many rows each seeding step generates and which
//! steps the binary executes, in order. Without a plan file the binary
//! falls back to [`RunPlan::default`].

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the run plan.
pub const DEFAULT_PLAN_PATH: &str = "taskstock.toml";

/// Configuration structure representing the entire `taskstock.toml` file
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct RunPlan {
    /// Row counts for the randomized seeding step
    #[serde(default)]
    pub seed: SeedCounts,
    /// Steps to run, in order
    #[serde(default = "default_steps")]
    pub steps: Vec<Step>,
}

/// How many rows the randomized seeding step generates per entity
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SeedCounts {
    /// Users to generate
    pub users: usize,
    /// Products to generate
    pub products: usize,
    /// Devices to generate
    pub devices: usize,
    /// Tasks to generate (each with 1-15 product associations)
    pub tasks: usize,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent
    pub rng_seed: Option<u64>,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            users: 150,
            products: 1300,
            devices: 50,
            tasks: 70,
            rng_seed: None,
        }
    }
}

/// A single step of the run plan
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Generate random users, products, devices and tasks
    Seed,
    /// Insert the hand-authored fixture
    Fixture,
    /// Print every user with the ids of its tasks
    UsersWithTasks,
    /// Print the per-task quantity sums
    TaskQuantities,
    /// Print the per-task price totals
    TaskPrices,
    /// Print the users reachable from a device
    DeviceUsers {
        /// Exact device name
        device: String,
    },
}

fn default_steps() -> Vec<Step> {
    vec![Step::TaskPrices]
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            seed: SeedCounts::default(),
            steps: default_steps(),
        }
    }
}

impl RunPlan {
    /// Parses a run plan from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse run plan: {e}"),
        })
    }
}

/// Loads a run plan from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A step has an unknown `action`
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<RunPlan> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read run plan {}: {e}", path.as_ref().display()),
    })?;

    RunPlan::from_toml(&contents)
}

/// Loads the run plan named by `TASKSTOCK_CONFIG` (default `taskstock.toml`),
/// or the default plan if that file does not exist.
pub fn load_default_plan() -> Result<RunPlan> {
    let path = std::env::var("TASKSTOCK_CONFIG").unwrap_or_else(|_| DEFAULT_PLAN_PATH.to_string());
    if Path::new(&path).exists() {
        tracing::debug!("Loading run plan from {path}");
        load_plan(&path)
    } else {
        tracing::info!("No run plan at {path}, using defaults");
        Ok(RunPlan::default())
    }
}
