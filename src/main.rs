//! # Pizza Order CLI
//!
//! Runs the page flows from the command line:
//!
//! - `menu` - prints the menu
//! - `order <ID>` - prints an order with its delivery estimate
//! - `priority <ID>` - upgrades an order to priority
//! - `address` - looks up the device address
//! - `demo` - fills a cart, submits it and follows the order
//!
//! `--offline` swaps the restaurant API for an in-memory one.

use clap::{Parser, Subcommand};
use pizza_order::flows::{LoadedOrder, SubmissionOutcome};
use pizza_order::lifecycle::{setup_tracing, AppConfig, ConfigError, PizzaSystem, Services};
use pizza_order::model::{CartItem, OrderId};
use pizza_order::services::InMemoryRestaurant;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[derive(Debug, Parser)]
#[command(name = "pizza_order", about = "Fast pizza ordering", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Use an in-memory restaurant instead of the HTTP API
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Menu,
    Order {
        id: String,
    },
    Priority {
        id: String,
    },
    Address,
    Demo {
        /// Name the order is placed under
        #[arg(long, default_value = "Ada")]
        customer: String,

        #[arg(long, default_value = "+1 555-123-4567")]
        phone: String,

        /// Delivery address; the looked-up address is used when empty
        #[arg(long, default_value = "")]
        address: String,

        #[arg(long)]
        priority: bool,
    },
}

impl Cli {
    fn load() -> Result<Self, ConfigError> {
        _ = dotenvy::dotenv();

        let cli = Self::try_parse()?;
        cli.config.validate()?;
        Ok(cli)
    }

    fn services(&self) -> Result<Services, ConfigError> {
        let mut services = Services::from_config(&self.config)?;
        if self.offline {
            services.restaurant = Arc::new(InMemoryRestaurant::with_sample_menu());
        }
        Ok(services)
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => return Err(e.to_string()),
    };
    setup_tracing();

    let services = cli.services().map_err(|e| e.to_string())?;
    let system = PizzaSystem::new(services, cli.config.store_buffer_size);

    let result = run(&system, cli.command).await;
    system.shutdown().await?;
    result
}

async fn run(system: &PizzaSystem, command: Commands) -> Result<(), String> {
    match command {
        Commands::Menu => print_menu(system).await,
        Commands::Order { id } => {
            let loaded = system.load_order(&OrderId(id)).await.map_err(|e| e.to_string())?;
            print_order(loaded).await;
            Ok(())
        }
        Commands::Priority { id } => {
            let id = OrderId(id);
            system.make_priority(&id).await.map_err(|e| e.to_string())?;
            let loaded = system.load_order(&id).await.map_err(|e| e.to_string())?;
            print_order(loaded).await;
            Ok(())
        }
        Commands::Address => {
            let fetched = system.fetch_address().await.map_err(|e| e.to_string())?;
            println!("{fetched:?}");
            Ok(())
        }
        Commands::Demo {
            customer,
            phone,
            address,
            priority,
        } => demo(system, customer, phone, address, priority).await,
    }
}

async fn print_menu(system: &PizzaSystem) -> Result<(), String> {
    let menu = system.load_menu().await.map_err(|e| e.to_string())?;
    for pizza in menu {
        let price = if pizza.sold_out {
            "SOLD OUT".to_string()
        } else {
            format!("€{:.2}", pizza.unit_price)
        };
        println!("{:>3}  {:<24} {:>9}  {}", pizza.id.0, pizza.name, price, pizza.ingredients.join(", "));
    }
    Ok(())
}

async fn print_order(loaded: LoadedOrder) {
    let estimate = loaded.estimate(chrono::Utc::now());
    let order = loaded.order.clone();

    println!("Order #{} status: {} order{}", order.id, order.status, if order.priority { " (priority)" } else { "" });
    println!("{estimate} (estimated delivery: {})", order.estimated_delivery.format("%b %d, %H:%M"));

    let ingredients = loaded.ingredients().await.unwrap_or_default();
    for item in order.cart.items() {
        let extra = ingredients
            .get(&item.pizza_id)
            .map(|i| i.join(", "))
            .unwrap_or_else(|| "Loading...".to_string());
        println!("  {}× {:<24} €{:.2}  {}", item.quantity, item.name, item.total_price, extra);
    }

    println!("Price pizza: €{:.2}", order.order_price);
    if order.priority {
        println!("Price priority: €{:.2}", order.priority_price);
    }
    println!("To pay on delivery: €{:.2}", order.total_to_pay());
}

async fn demo(
    system: &PizzaSystem,
    customer: String,
    phone: String,
    address: String,
    priority: bool,
) -> Result<(), String> {
    system
        .user_client
        .set_username(customer)
        .await
        .map_err(|e| e.to_string())?;

    if address.is_empty() {
        if let Err(e) = system.fetch_address().await {
            warn!(error = %e, "Could not look up the address, enter it manually");
        }
    }

    let menu = system.load_menu().await.map_err(|e| e.to_string())?;
    let available: Vec<_> = menu.iter().filter(|pizza| !pizza.sold_out).take(2).collect();

    let span = tracing::info_span!("cart");
    async {
        for pizza in &available {
            let item = CartItem::new(pizza.id, pizza.name.clone(), 1, pizza.unit_price);
            system.cart_client.add_item(item.clone()).await?;
            system.cart_client.add_item(item).await?;
        }
        if let Some(last) = available.last() {
            system.cart_client.decrease_quantity(last.id).await?;
        }
        Ok::<_, pizza_order::cart_actor::CartError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let quantity = system.cart_client.total_quantity().await.map_err(|e| e.to_string())?;
    let total = system.cart_client.total_price().await.map_err(|e| e.to_string())?;
    info!(quantity, total, "Cart ready");

    let form = system
        .order_form(&phone, &address, priority)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("order_processing");
    let outcome = system
        .submit_order(form)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    match outcome {
        SubmissionOutcome::Invalid(errors) => {
            if let Some(message) = errors.phone {
                println!("{message}");
            }
            Ok(())
        }
        SubmissionOutcome::Created { order, redirect, .. } => {
            println!("-> {}", redirect.path);
            let loaded = system.load_order(&order.id).await.map_err(|e| e.to_string())?;
            print_order(loaded).await;

            if !order.priority {
                system.make_priority(&order.id).await.map_err(|e| e.to_string())?;
                let loaded = system.load_order(&order.id).await.map_err(|e| e.to_string())?;
                print_order(loaded).await;
            }
            Ok(())
        }
    }
}
