use std::sync::Arc;

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;

use storefront_backend::api::{
    AuthApi, BrandsApi, CategoriesApi, DetailsApi, HealthApi, ProductsApi,
};
use storefront_backend::config::{init_logging, Settings};
use storefront_backend::coordinators::AuthCoordinator;
use storefront_backend::AppData;

/// Storefront backend CLI
#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog and auth backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logging()?;

    let settings = Settings::from_env()?;
    let cli = Cli::parse();

    let db = Database::connect(&settings.database_url).await?;
    tracing::info!("Connected to database: {}", settings.database_url);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            Migrator::up(&db, None).await?;
            tracing::info!("Database migrations completed");
        }
        Commands::Serve => {
            Migrator::up(&db, None).await?;
            tracing::info!("Database migrations completed");

            serve(settings, db).await?;
        }
    }

    Ok(())
}

async fn serve(settings: Settings, db: sea_orm::DatabaseConnection) -> Result<(), std::io::Error> {
    let bind_address = settings.bind_address.clone();
    let app_data = Arc::new(AppData::init(&settings, db));

    let auth_coordinator = Arc::new(AuthCoordinator::new(
        app_data.credential_store.clone(),
        app_data.token_service.clone(),
    ));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(auth_coordinator),
            ProductsApi::new(app_data.product_store.clone()),
            BrandsApi::new(app_data.brand_store.clone()),
            CategoriesApi::new(app_data.category_store.clone()),
            DetailsApi::new(app_data.detail_store.clone()),
        ),
        "Storefront API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", bind_address));

    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("Starting server on http://{}", bind_address);
    Server::new(TcpListener::bind(bind_address)).run(app).await
}
