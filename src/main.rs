//! Product Inventory CLI
//!
//! Thin wrapper over the library: each subcommand runs one catalog, report or
//! backup operation against the JSON document and prints the result.

use clap::{Parser, Subcommand, ValueEnum};
use product_inventory::config::default_data_dir;
use product_inventory::formatters::{
    format_categories, format_product_details, format_products_table,
};
use product_inventory::parsers::{parse_price, parse_quantity};
use product_inventory::{
    Config, Confirmation, Inventory, InventoryError, NewProduct, Product, ProductUpdate,
    Result, StockAdjustment,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Single-user product inventory: catalog, stock, categories, reports and backups
#[derive(Parser, Debug)]
#[command(name = "product_inventory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding products.json, backups/ and reports/
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the catalog document (overrides --data-dir)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Directory for backups (overrides --data-dir)
    #[arg(long, global = true)]
    backup_dir: Option<PathBuf>,

    /// Directory for CSV reports (overrides --data-dir)
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new product
    Register {
        /// Unique product code (case-insensitive)
        code: String,
        name: String,
        /// Category; left empty the product is uncategorized
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one product by code
    Show { code: String },
    /// Search products by name substring or category
    Search {
        #[arg(long, conflicts_with = "category", required_unless_present = "category")]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Change some fields of a product; omitted fields stay as they are
    Modify {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a product (asks for confirmation unless --yes)
    Delete {
        code: String,
        #[arg(long)]
        yes: bool,
    },
    /// List all products
    List,
    /// Adjust the quantity on hand
    Stock {
        code: String,
        #[arg(value_enum)]
        mode: StockMode,
        amount: String,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Export all products to a new CSV report
    Report,
    /// Save and copy the catalog document to the backup directory
    Backup,
    /// List existing backups
    Backups,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StockMode {
    /// Set the exact quantity
    Set,
    /// Increase by the amount
    Add,
    /// Decrease by the amount
    Remove,
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    /// List known categories
    List,
    /// Create a category
    Create { name: String },
    /// Rename a category and move its products
    Rename { old: String, new: String },
    /// Delete a category; its products become uncategorized
    Delete { name: String },
}

impl Args {
    fn config(&self) -> Config {
        let base = self.data_dir.clone().unwrap_or_else(default_data_dir);
        let mut config = Config::in_dir(base);
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
        if let Some(dir) = &self.backup_dir {
            config.backup_dir = dir.clone();
        }
        if let Some(dir) = &self.report_dir {
            config.report_dir = dir.clone();
        }
        config
    }
}

fn main() {
    // Set RUST_LOG to see diagnostics, e.g. RUST_LOG=product_inventory=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("Command failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.config();
    config.ensure_dirs()?;
    log::debug!("Catalog document: {}", config.data_file.display());

    let mut inventory = Inventory::open(config.store());

    match args.command {
        Command::Register {
            code,
            name,
            category,
            quantity,
            price,
            description,
        } => {
            let new = NewProduct {
                code,
                name,
                category,
                quantity: parse_quantity(&quantity)?,
                price: parse_price(&price)?,
                description,
            };
            let product = inventory.register(new)?;
            println!("Product '{}' registered.", product.code);
        }
        Command::Show { code } => {
            let product = inventory
                .catalog()
                .find_by_code(&code)
                .ok_or(InventoryError::ProductNotFound(code))?;
            print!("{}", format_product_details(product));
        }
        Command::Search { name, category } => {
            let results = match (name, category) {
                (Some(name), _) => inventory.catalog().find_by_name_substring(&name),
                (None, Some(category)) => inventory.catalog().find_by_category(&category),
                (None, None) => Vec::new(),
            };
            print_table_or(&results, "No matching products.");
        }
        Command::Modify {
            code,
            name,
            category,
            quantity,
            price,
            description,
        } => {
            let update = ProductUpdate {
                name,
                category,
                quantity,
                price,
                description,
            };
            let outcome = inventory.modify(&code, update)?;
            for rejected in &outcome.rejected {
                eprintln!(
                    "Invalid {}: {}; keeping the previous value.",
                    rejected.field, rejected.reason
                );
            }
            if outcome.is_changed() {
                println!("Product updated ({}).", outcome.changed.join(", "));
            } else {
                println!("Nothing changed.");
            }
        }
        Command::Delete { code, yes } => {
            let confirmation = if yes {
                Confirmation::Confirmed
            } else {
                let product = inventory
                    .catalog()
                    .find_by_code(&code)
                    .ok_or_else(|| InventoryError::ProductNotFound(code.clone()))?;
                print!("{}", format_product_details(product));
                ask_confirmation("Confirm deletion? (y/N): ")?
            };
            match inventory.delete(&code, confirmation)? {
                Some(product) => println!("Product '{}' deleted.", product.code),
                None => println!("Deletion cancelled."),
            }
        }
        Command::List => {
            let products: Vec<&Product> = inventory.catalog().products().iter().collect();
            print_table_or(&products, "(no products registered)");
        }
        Command::Stock { code, mode, amount } => {
            let amount = parse_quantity(&amount)?;
            let adjustment = match mode {
                StockMode::Set => StockAdjustment::Set(amount),
                StockMode::Add => StockAdjustment::Increment(amount),
                StockMode::Remove => StockAdjustment::Decrement(amount),
            };
            let quantity = inventory.adjust_stock(&code, adjustment)?;
            println!("Stock updated: {quantity} units.");
        }
        Command::Category { action } => run_category(&mut inventory, action)?,
        Command::Report => match inventory.generate_report(&config.reporter()) {
            Ok(path) => println!("Report generated: {}", path.display()),
            Err(InventoryError::NothingToExport) => println!("No products to export."),
            Err(e) => return Err(e),
        },
        Command::Backup => {
            let path = inventory.backup(&config.backup_manager())?;
            println!("Backup created: {}", path.display());
        }
        Command::Backups => {
            let backups = config.backup_manager().list()?;
            if backups.is_empty() {
                println!("(no backups)");
            }
            for path in backups {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

fn run_category(inventory: &mut Inventory, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            println!("{}", format_categories(inventory.catalog().categories()));
        }
        CategoryAction::Create { name } => {
            inventory.create_category(&name)?;
            println!("Category '{}' created.", name.trim());
        }
        CategoryAction::Rename { old, new } => {
            let updated = inventory.rename_category(&old, &new)?;
            println!("Category renamed; {updated} products updated.");
        }
        CategoryAction::Delete { name } => {
            let reassigned = inventory.delete_category(&name)?;
            println!("Category deleted; {reassigned} products moved to uncategorized.");
        }
    }
    Ok(())
}

fn print_table_or(products: &[&Product], empty_message: &str) {
    if products.is_empty() {
        println!("{empty_message}");
    } else {
        print!("{}", format_products_table(products));
    }
}

fn ask_confirmation(prompt: &str) -> Result<Confirmation> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(Confirmation::from_answer(&answer))
}
