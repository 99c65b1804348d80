use anyhow::Result;
use clap::{Parser, Subcommand};
use server_api::ApiContext;
use shared::{domain::DEFAULT_LOW_STOCK_THRESHOLD, error::ApiException, protocol::NewProduct};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./techstock.db")]
    database_url: String,
    /// Must match the server's `low_stock_threshold` for seeded statuses to agree.
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    low_stock_threshold: i64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert a product directly into the database.
    Seed {
        name: String,
        quantity: i64,
    },
    List,
}

fn build_context(storage: Storage, low_stock_threshold: i64) -> ApiContext {
    let mut ctx = ApiContext::new(storage);
    ctx.low_stock_threshold = low_stock_threshold;
    ctx
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;
    let ctx = build_context(storage, cli.low_stock_threshold);

    match cli.command {
        Command::Seed { name, quantity } => {
            let product = server_api::create_product(&ctx, NewProduct { name, quantity })
                .await
                .map_err(ApiException::from)?;
            println!(
                "created product_id={} status={}",
                product.id, product.status
            );
        }
        Command::List => {
            let products = server_api::list_products(&ctx)
                .await
                .map_err(ApiException::from)?;
            for product in products {
                println!(
                    "{}\t{}\t{}\t{}",
                    product.id, product.name, product.quantity, product.status
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::STATUS_LOW_STOCK;

    #[test]
    fn threshold_defaults_to_server_default() {
        let cli = Cli::parse_from(["tools", "list"]);
        assert_eq!(cli.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }

    #[tokio::test]
    async fn seed_uses_configured_threshold() {
        let cli = Cli::parse_from([
            "tools",
            "--low-stock-threshold",
            "20",
            "seed",
            "Router",
            "10",
        ]);
        let storage = Storage::new("sqlite::memory:").await.expect("db");
        let ctx = build_context(storage, cli.low_stock_threshold);

        let product = server_api::create_product(
            &ctx,
            NewProduct {
                name: "Router".to_string(),
                quantity: 10,
            },
        )
        .await
        .expect("seed");

        assert_eq!(product.status, STATUS_LOW_STOCK);
    }
}
