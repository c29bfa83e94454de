//! adbook - command line access to the ad-booking console backend
//!
//! Commands:
//! - `adbook list <resource>` - List a collection
//! - `adbook show <resource> <id>` - Show one record

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adbook::error::ApiError;
use adbook::models::Resource;
use adbook::stores::{ConsoleStores, ListQuery, ResourceStore};
use adbook::{spawn_cleanup_task, ApiClient, Config, LoaderRegistry};

/// Query the ad-booking console backend
#[derive(Parser)]
#[command(name = "adbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection
    List {
        resource: ResourceKind,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a single record
    Show { resource: ResourceKind, id: u64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceKind {
    Campaigns,
    Properties,
    Categories,
    Faqs,
    Users,
    Roles,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    info!(
        "Configuration loaded: base_url={}, default_ttl={}ms, timeout={}s",
        config.api_base_url, config.default_ttl_ms, config.request_timeout
    );

    let client = ApiClient::from_config(&config).context("failed to build HTTP client")?;
    let stores = ConsoleStores::from_config(&client, &config);
    let cleanup_handle = spawn_cleanup_task(client.cache(), config.cleanup_interval());

    let output = match cli.command {
        Commands::List {
            resource,
            page,
            per_page,
            search,
        } => {
            let query = ListQuery {
                page,
                per_page,
                search,
            };
            list(&stores, resource, &query).await?
        }
        Commands::Show { resource, id } => show(&stores, resource, id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    let stats = client.cache_stats().await;
    debug!(?stats, "request cache");
    cleanup_handle.abort();
    Ok(())
}

/// Reference table whose names label a record of `kind`, if any.
fn lookup_table_for(kind: ResourceKind) -> Option<&'static str> {
    match kind {
        ResourceKind::Campaigns => Some("categories"),
        ResourceKind::Users => Some("roles"),
        _ => None,
    }
}

fn lookup_tables(stores: &ConsoleStores) -> LoaderRegistry<Value> {
    let mut lookups = LoaderRegistry::new();

    let categories = stores.categories.clone();
    lookups.register("categories", move || list_all(categories.clone()));

    let roles = stores.roles.clone();
    lookups.register("roles", move || list_all(roles.clone()));

    lookups
}

async fn list_all<T: Resource>(store: ResourceStore<T>) -> Result<Value, ApiError> {
    to_json(store.list(&ListQuery::new()).await?)
}

fn to_json<S: Serialize>(value: S) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

async fn list(stores: &ConsoleStores, kind: ResourceKind, query: &ListQuery) -> Result<Value> {
    let value = match kind {
        ResourceKind::Campaigns => to_json(stores.campaigns.list(query).await?)?,
        ResourceKind::Properties => to_json(stores.properties.list(query).await?)?,
        ResourceKind::Categories => to_json(stores.categories.list(query).await?)?,
        ResourceKind::Faqs => to_json(stores.faqs.list(query).await?)?,
        ResourceKind::Users => to_json(stores.users.list(query).await?)?,
        ResourceKind::Roles => to_json(stores.roles.list(query).await?)?,
    };
    Ok(value)
}

async fn show(stores: &ConsoleStores, kind: ResourceKind, id: u64) -> Result<Value> {
    // Warm the label table while the record itself is fetched
    let lookups = lookup_tables(stores);
    if let Some(table) = lookup_table_for(kind) {
        drop(lookups.preload(table));
    }
    let lookups = &lookups;

    let value = match kind {
        ResourceKind::Campaigns => {
            let campaign = stores.campaigns.fetch(id).await?;
            let category = lookup_name(lookups, "categories", campaign.category_id).await;
            with_label(to_json(campaign)?, "category", category)
        }
        ResourceKind::Users => {
            let user = stores.users.fetch(id).await?;
            let role = lookup_name(lookups, "roles", user.role_id).await;
            with_label(to_json(user)?, "role", role)
        }
        ResourceKind::Properties => to_json(stores.properties.fetch(id).await?)?,
        ResourceKind::Categories => to_json(stores.categories.fetch(id).await?)?,
        ResourceKind::Faqs => to_json(stores.faqs.fetch(id).await?)?,
        ResourceKind::Roles => to_json(stores.roles.fetch(id).await?)?,
    };
    Ok(value)
}

/// Finds the `name` of record `id` in a preloaded lookup table.
async fn lookup_name(
    lookups: &LoaderRegistry<Value>,
    table: &str,
    id: Option<u64>,
) -> Option<String> {
    let id = id?;
    let table = match lookups.load(table).await {
        Ok(table) => table,
        Err(err) => {
            debug!(error = %err, "lookup unavailable");
            return None;
        }
    };

    table
        .get("items")?
        .as_array()?
        .iter()
        .find(|item| item.get("id").and_then(Value::as_u64) == Some(id))?
        .get("name")?
        .as_str()
        .map(str::to_string)
}

fn with_label(mut record: Value, field: &str, label: Option<String>) -> Value {
    if let (Some(label), Some(object)) = (label, record.as_object_mut()) {
        object.insert(format!("{}_name", field), Value::String(label));
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_labelled_resources_need_lookups() {
        assert_eq!(lookup_table_for(ResourceKind::Campaigns), Some("categories"));
        assert_eq!(lookup_table_for(ResourceKind::Users), Some("roles"));
        for kind in [
            ResourceKind::Properties,
            ResourceKind::Categories,
            ResourceKind::Faqs,
            ResourceKind::Roles,
        ] {
            assert_eq!(lookup_table_for(kind), None);
        }
    }

    #[tokio::test]
    async fn test_building_lookups_sends_nothing() {
        let client = ApiClient::from_config(&Config::default()).unwrap();
        let stores = ConsoleStores::from_config(&client, &Config::default());

        let lookups = lookup_tables(&stores);

        assert_eq!(lookups.len(), 2);
        for table in ["categories", "roles"] {
            assert!(!lookups.state(table).unwrap().is_settled());
        }
        assert_eq!(client.cache_stats().await.misses, 0);
    }

    #[test]
    fn test_label_added_to_object() {
        let record = with_label(json!({ "id": 1 }), "role", Some("Admin".to_string()));
        assert_eq!(record["role_name"], "Admin");

        let untouched = with_label(json!({ "id": 1 }), "role", None);
        assert!(untouched.get("role_name").is_none());
    }
}
