use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use tracing::info;

use crate::product::ProductDocument;

/// Connect and ping; an unreachable server is an error, not a lazy failure later.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<Database> {
    let mut opts = ClientOptions::parse(&cfg.url).await?;
    opts.app_name = Some("catalog".into());
    opts.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    opts.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));

    let client = Client::with_options(opts)?;
    let db = client.database(&cfg.name);
    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %cfg.name, "mongodb connected");
    Ok(db)
}

pub fn products(db: &Database, collection: &str) -> Collection<ProductDocument> {
    db.collection::<ProductDocument>(collection)
}
