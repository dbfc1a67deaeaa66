use anyhow::{Context, Result};
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<()> {
    info!("Ensuring database indexes...");

    db.collection::<Document>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
        )
        .await
        .context("Failed to create users.email index")?;

    // Offers without a code are left out of the index.
    db.collection::<Document>("offers")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(IndexOptions::builder().unique(true).sparse(true).build())
                .build(),
        )
        .await
        .context("Failed to create offers.code index")?;

    info!("Database indexes in place");

    Ok(())
}
