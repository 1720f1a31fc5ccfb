use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::handlers;
use api::middleware::auth::AuthMiddleware;
use api::state::AppState;
use infrastructure::database::DatabaseConnections;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,api=debug,actix_web=info".into());

    let is_json = std::env::var("LOG_FORMAT").unwrap_or_default() == "json";

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init();
    }

    let config = Config::from_env()?;
    tracing::info!("Starting bazaar messaging API...");

    let connections = DatabaseConnections::new(&config.database_url, &config.redis_url).await?;

    if config.run_migrations {
        Migrator::up(&connections.postgres, None).await?;
        tracing::info!("Migrations applied");
    }

    let state = web::Data::new(AppState::from_connections(&connections));
    let config_data = web::Data::new(config.clone());

    let server_addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", server_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(AuthMiddleware)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(config_data.clone())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
