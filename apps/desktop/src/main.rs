use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{HttpInventoryApi, ProductListController, DEFAULT_SERVER_URL};
use shared::{domain::ProductId, protocol::Product};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "TechStock inventory from the terminal")]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every product.
    List,
    Add {
        name: String,
        quantity: String,
    },
    Remove {
        id: i64,
    },
    Increment {
        id: i64,
    },
    Decrement {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let api = HttpInventoryApi::new(&args.server_url)?;
    let mut controller = ProductListController::new(Arc::new(api));

    if controller.load().await.is_ok() {
        let outcome = match args.command {
            Command::List => Ok(()),
            Command::Add { name, quantity } => match controller.add(&name, &quantity).await {
                Ok(None) => {
                    println!("Nothing to add: name and quantity are both required.");
                    Ok(())
                }
                Ok(Some(_)) => Ok(()),
                Err(err) => Err(err),
            },
            Command::Remove { id } => controller.remove(ProductId(id)).await,
            Command::Increment { id } => controller.increment(ProductId(id)).await.map(|_| ()),
            Command::Decrement { id } => controller.decrement(ProductId(id)).await.map(|_| ()),
        };
        if let Err(err) = outcome {
            tracing::debug!(error = %err, "command failed");
        }
    }

    print_products(controller.products());
    if let Some(message) = controller.error() {
        eprintln!("{message}");
        std::process::exit(1);
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("(no products)");
        return;
    }
    println!("{:>6}  {:<32} {:>10}  STATUS", "ID", "NAME", "QUANTITY");
    for line in products.iter().map(render_row) {
        println!("{line}");
    }
}

fn render_row(product: &Product) -> String {
    format!(
        "{:>6}  {:<32} {:>10}  {}",
        product.id, product.name, product.quantity, product.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_row() {
        let row = render_row(&Product {
            id: ProductId(12),
            name: "Cabo HDMI".to_string(),
            quantity: 3,
            status: "Baixo Estoque".to_string(),
        });
        assert!(row.starts_with("    12  Cabo HDMI"));
        assert!(row.ends_with("         3  Baixo Estoque"));
    }

    #[test]
    fn parses_adjust_subcommands() {
        let args = Args::try_parse_from(["desktop", "decrement", "4"]).expect("args");
        assert_eq!(args.server_url, DEFAULT_SERVER_URL);
        assert!(matches!(args.command, Command::Decrement { id: 4 }));
    }
}
