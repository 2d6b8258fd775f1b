//! Executes run plan steps.
//!
//! Each step returns the lines it wants printed; the binary writes them to
//! standard output. Keeping output as data lets tests check it directly.

use crate::{
    config::plan::{SeedCounts, Step},
    core::{fixture, query, seed},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

/// Runs one step and returns its output lines.
#[instrument(skip(db, counts, ctx))]
pub async fn run_step(
    db: &DatabaseConnection,
    step: &Step,
    counts: &SeedCounts,
    ctx: &mut seed::GenContext,
) -> Result<Vec<String>> {
    let lines = match step {
        Step::Seed => {
            let summary = seed::seed_all(db, counts, ctx).await?;
            vec![format!(
                "seeded {} users, {} products, {} devices, {} tasks ({} product links)",
                summary.users,
                summary.products,
                summary.devices,
                summary.tasks.tasks,
                summary.tasks.associations
            )]
        }
        Step::Fixture => {
            let loaded = fixture::load_fixture(db).await?;
            vec![format!(
                "fixture loaded: {} users, {} devices, {} products, {} tasks",
                loaded.users.len(),
                loaded.devices.len(),
                loaded.products.len(),
                loaded.tasks.len()
            )]
        }
        Step::UsersWithTasks => query::users_with_tasks(db)
            .await?
            .iter()
            .map(|(user, tasks)| query::format_user_tasks(user, tasks))
            .collect(),
        Step::TaskQuantities => query::task_quantity_totals(db)
            .await?
            .iter()
            .map(query::format_quantity_total)
            .collect(),
        Step::TaskPrices => query::task_price_totals(db)
            .await?
            .iter()
            .map(query::format_price_total)
            .collect(),
        Step::DeviceUsers { device } => query::users_of_device(db, device)
            .await?
            .into_iter()
            .map(|user| user.name)
            .collect(),
    };

    info!("Step produced {} lines", lines.len());
    Ok(lines)
}

/// Runs every step in order, stopping at the first failure.
pub async fn run_plan(
    db: &DatabaseConnection,
    steps: &[Step],
    counts: &SeedCounts,
    ctx: &mut seed::GenContext,
) -> Result<Vec<String>> {
    let mut output = Vec::new();
    for step in steps {
        output.extend(run_step(db, step, counts, ctx).await?);
    }
    Ok(output)
}
