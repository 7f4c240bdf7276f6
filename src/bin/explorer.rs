use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use product_explorer::{
    catalog::{CategoryFilter, Filters, SortOption, category_label, parse_product_id},
    config::Config,
    engine::{apply, categories},
    favorites::{FavoritesStore, JsonFileStore},
    remote::CatalogClient,
    reveal::RevealController,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Title search text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Restrict to one category
    #[arg(short, long)]
    category: Option<String>,

    /// Price ordering: default, price-asc, or price-desc
    #[arg(long, default_value = "default")]
    sort: String,

    /// Show favorited products only
    #[arg(short, long)]
    favorites: bool,

    /// Toggle these product ids in the favorite set first
    #[arg(short, long = "toggle", value_name = "ID")]
    toggle: Vec<u64>,

    /// Show a single product and exit
    #[arg(long, value_name = "ID")]
    id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = Config::load();
    let client = CatalogClient::new(&config.api_base);

    if let Some(raw) = &args.id {
        return show_product(&client, raw).await;
    }

    let sort = match args.sort.as_str() {
        "default" => SortOption::Default,
        "price-asc" => SortOption::PriceAsc,
        "price-desc" => SortOption::PriceDesc,
        other => bail!("Unknown sort {other:?}, expected default, price-asc, or price-desc"),
    };

    let mut store = FavoritesStore::new(Box::new(JsonFileStore::new(&config.storage_dir)));
    store.hydrate().await;
    for id in &args.toggle {
        store.toggle(*id).await;
    }

    let products = client.fetch_all().await?;
    info!(
        "Fetched {} products across {} categories",
        products.len(),
        categories(&products).len()
    );

    let filters = Filters {
        search: args.search,
        category: match args.category {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::All,
        },
        show_favorites: args.favorites,
        sort,
    };

    let page_size = if args.favorites {
        config.favorites_page_size
    } else {
        config.catalog_page_size
    };
    let mut window = RevealController::new(apply(&products, &filters, &store.favorites()), page_size);

    let mut printed = 0;
    loop {
        for product in &window.visible()[printed..] {
            let marker = if store.is_favorite(product.id) { "*" } else { " " };
            println!(
                "{marker} [{:>3}] {:<60} {:>8.2}  {}",
                product.id,
                product.title,
                product.price,
                category_label(&product.category)
            );
        }
        printed = window.visible().len();

        if !window.has_more() {
            break;
        }
        println!("--- more ---");
        window.advance();
    }

    Ok(())
}

async fn show_product(client: &CatalogClient, raw: &str) -> Result<()> {
    let Ok(id) = parse_product_id(raw) else {
        println!("Invalid product id: {raw}");
        return Ok(());
    };

    match client.fetch_by_id(id).await {
        Ok(product) => {
            println!("[{}] {}", product.id, product.title);
            println!("{:.2} | {}", product.price, category_label(&product.category));
            println!(
                "rated {:.1} by {} reviews",
                product.rating.rate, product.rating.count
            );
            println!("\n{}", product.description);
        }
        Err(e) if e.is_not_found() => println!("Product not found"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
