use dotenvy::dotenv;
use taskstock::{
    config::{database, plan},
    core::seed::GenContext,
    errors::Result,
    runner,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can be set externally
    dotenv().ok();

    // 3. Load the run plan
    let plan = plan::load_default_plan()
        .inspect_err(|e| error!("Failed to load run plan: {}", e))?;
    info!("Run plan has {} steps", plan.steps.len());

    // 4. Open the store and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection opened"))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Run the steps; the connection is released when `db` drops
    let mut ctx = GenContext::new(plan.seed.rng_seed);
    let lines = runner::run_plan(&db, &plan.steps, &plan.seed, &mut ctx)
        .await
        .inspect_err(|e| error!("Run plan failed: {}", e))?;
    for line in lines {
        println!("{line}");
    }

    Ok(())
}
