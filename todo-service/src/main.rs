use anyhow::Context;
use todo_service::{database, observability, prelude::*, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    observability::init_tracing(&config)?;

    let pool = database::create_pool(&config.database).await?;
    if config.database.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let lists = PgListRepository::new(pool, config.database.query_timeout());
    let state = AppState::new(config.clone(), lists);

    Server::new(config).serve(routes::router(state)).await?;
    Ok(())
}
