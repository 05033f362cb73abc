//! Seed command - catalog data outside the HTTP surface.

use std::sync::Arc;

use crate::cli::args::{SeedArgs, SeedServiceArgs, SeedTarget};
use crate::config::Config;
use crate::domain::NewService;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{CatalogManager, CatalogService};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;

    let result = match args.target {
        SeedTarget::Service(service) => seed_service(&db, service).await,
    };

    db.close().await?;
    result
}

/// Publish a service for the provider registered under `provider_email`
async fn seed_service(db: &Database, args: SeedServiceArgs) -> AppResult<()> {
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let provider = uow
        .users()
        .find_by_email(args.provider_email.trim())
        .await?
        .ok_or_not_found("Provider")?;
    let service_type = uow
        .catalog()
        .find_service_type_by_name(args.service_type.trim())
        .await?
        .ok_or_not_found("Service type")?;

    let listing = CatalogManager::new(uow)
        .create_service(
            provider.id,
            NewService {
                service_type_id: service_type.id,
                title: args.title.trim().to_string(),
                description: args.description,
                price: args.price,
            },
        )
        .await?;

    println!(
        "Created service {} ({}) for {} under {}",
        listing.id, listing.title, provider.email, service_type.name
    );
    Ok(())
}
