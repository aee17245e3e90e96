//! TokenEstate command line: browse the market, mint listings, buy shares.

mod render;

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use estate_app::{AppConfig, Notifier, OlaGeocoder, ViewController, View};
use estate_market::{CategoryFilter, SortOrder};
use estate_store::{FileKeyValueStore, RestDataClient};
use estate_types::ListingId;
use estate_utils::LogFormat;
use estate_wallet_core::{JsonRpcWallet, PaymentGateway, WalletBrand, WalletProvider};

#[derive(Parser)]
#[command(name = "tokenestate", about = "Fractional real-estate marketplace client")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ESTATE_CONFIG")]
    config: Option<PathBuf>,

    /// Listing database URL.
    #[arg(long, env = "ESTATE_DATA_URL")]
    data_url: Option<String>,

    /// Listing database API key.
    #[arg(long, env = "ESTATE_DATA_KEY", hide_env_values = true)]
    data_key: Option<String>,

    /// Wallet JSON-RPC endpoint.
    #[arg(long, env = "ESTATE_WALLET_RPC")]
    wallet_rpc: Option<String>,

    /// Wallet product: "metamask", "coinbase", or "generic".
    #[arg(long, env = "ESTATE_WALLET_BRAND")]
    wallet_brand: Option<String>,

    /// Maps API key. Without one, no maps are shown.
    #[arg(long, env = "ESTATE_MAPS_KEY", hide_env_values = true)]
    maps_key: Option<String>,

    /// Directory for saved preferences.
    #[arg(long, env = "ESTATE_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ESTATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ESTATE_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Log in with the configured wallet.
    Connect,
    /// Log in as the demo investor.
    DemoLogin,
    Logout,
    /// Switch between the light and dark theme.
    Theme,
    /// Browse listings.
    Market {
        /// Match against title and location.
        #[arg(long, default_value = "")]
        search: String,
        /// "All Types", "Residence", "Commercial", "Land", or "Other".
        #[arg(long, default_value = "All Types")]
        category: CategoryFilter,
        /// "default", "price-asc", "price-desc", or "yield-asc".
        #[arg(long, default_value = "default")]
        sort: SortOrder,
    },
    /// Show one listing in detail.
    Show { id: String },
    /// Show the logged-in account's holdings.
    Portfolio,
    /// Show listings minted by the logged-in account.
    Listings,
    /// Tokenize a property.
    Mint {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Price per share in ETH.
        #[arg(long, default_value_t = 0.01)]
        price: f64,
        #[arg(long, default_value_t = 1000)]
        shares: u64,
        /// Annual yield percentage.
        #[arg(long = "yield", default_value_t = 6.5)]
        yield_pct: f64,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Change the price or share count of one of your listings.
    Edit {
        id: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        shares: Option<u64>,
    },
    /// Buy shares of a listing.
    Buy {
        id: String,
        #[arg(long, default_value_t = 1)]
        quantity: u64,
    },
    /// Print the effective configuration.
    Config,
}

/// Prints alerts straight to the terminal.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("» {message}");
    }
}

/// Load the config file, if any. Failures fall back to defaults and are
/// returned as a warning to log once logging is up.
fn load_file_config(path: Option<&PathBuf>) -> (AppConfig, Option<String>) {
    let Some(path) = path else {
        return (AppConfig::default(), None);
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => match AppConfig::from_toml_str(&contents) {
            Ok(config) => (config, None),
            Err(e) => (
                AppConfig::default(),
                Some(format!("Failed to parse config file: {e}, using CLI defaults")),
            ),
        },
        Err(e) => (
            AppConfig::default(),
            Some(format!(
                "Failed to read config file {}: {e}, using CLI defaults",
                path.display()
            )),
        ),
    }
}

/// Apply flags and env vars on top of the file configuration.
fn merge(mut config: AppConfig, cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Some(url) = &cli.data_url {
        config.data.url = url.clone();
    }
    if let Some(key) = &cli.data_key {
        config.data.api_key = key.clone();
    }
    if let Some(rpc) = &cli.wallet_rpc {
        config.wallet.rpc_url = rpc.clone();
    }
    if let Some(brand) = &cli.wallet_brand {
        config.wallet.brand = match brand.to_ascii_lowercase().as_str() {
            "metamask" => WalletBrand::MetaMask,
            "coinbase" => WalletBrand::Coinbase,
            "generic" => WalletBrand::Generic,
            other => bail!("unknown wallet brand: {other}"),
        };
    }
    if let Some(key) = &cli.maps_key {
        config.geocoder.api_key = key.clone();
    }
    if let Some(dir) = &cli.state_dir {
        config.state_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

fn build_controller(config: &AppConfig) -> anyhow::Result<ViewController> {
    if config.data.url.trim().is_empty() {
        bail!("no listing database configured; set --data-url or [data].url");
    }
    let data = RestDataClient::new(&config.data.url, &config.data.api_key)?;
    let prefs = FileKeyValueStore::open(config.preferences_path())
        .with_context(|| format!("opening {}", config.preferences_path().display()))?;

    let provider: Option<Arc<dyn WalletProvider>> = if config.wallet.rpc_url.trim().is_empty() {
        None
    } else {
        let wallet = JsonRpcWallet::new(&config.wallet.rpc_url, config.wallet.brand)?
            .with_confirmation_polling(
                config.wallet.poll_interval(),
                config.wallet.confirmation_timeout(),
            );
        Some(Arc::new(wallet))
    };
    let gateway = PaymentGateway::new(provider, config.wallet.payment_config()?);

    let mut controller = ViewController::new(
        Arc::new(data),
        Arc::new(prefs),
        gateway,
        Arc::new(ConsoleNotifier),
    );
    if !config.geocoder.api_key.trim().is_empty() {
        let geocoder = OlaGeocoder::new(&config.geocoder.base_url, &config.geocoder.api_key)?;
        controller = controller.with_geocoder(Arc::new(geocoder));
    }
    Ok(controller)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, config_warning) = load_file_config(cli.config.as_ref());
    let config = merge(file_config, &cli)?;

    let format: LogFormat = config.log_format.parse().unwrap_or_default();
    estate_utils::init_logging(format, &config.log_level);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut controller = build_controller(&config)?;
    controller.restore().await;

    match cli.command {
        Command::Connect => {
            let account = controller.connect_wallet().await?;
            println!("Connected {} as {account}", controller.wallet_name());
        }
        Command::DemoLogin => {
            let account = controller.demo_login().await;
            println!("Logged in as {account}");
        }
        Command::Logout => {
            controller.logout();
            println!("Logged out");
        }
        Command::Theme => {
            let theme = controller.toggle_theme();
            println!("Theme: {}", theme.as_str());
        }
        Command::Market {
            search,
            category,
            sort,
        } => {
            controller.fetch_data().await;
            controller.set_view(View::Market);
            let query = &mut controller.state_mut().query;
            query.search = search;
            query.category = category;
            query.sort = sort;
            render::market(&controller);
        }
        Command::Show { id } => {
            controller.fetch_data().await;
            controller.select_listing(&ListingId::new(id)).await?;
            render::asset(&controller);
        }
        Command::Portfolio => {
            require_login(&controller)?;
            render::portfolio(&controller);
        }
        Command::Listings => {
            require_login(&controller)?;
            controller.set_view(View::Seller);
            render::seller(&controller);
        }
        Command::Mint {
            title,
            location,
            price,
            shares,
            yield_pct,
            image,
        } => {
            require_login(&controller)?;
            controller.set_view(View::Seller);
            let form = &mut controller.state_mut().mint_form;
            form.title = title;
            form.location = location;
            form.price_per_share = price;
            form.total_shares = shares;
            form.yield_pct = yield_pct;
            form.image_url = image;
            controller.mint().await?;
        }
        Command::Edit { id, price, shares } => {
            require_login(&controller)?;
            let edit = controller.begin_edit(&ListingId::new(id))?;
            if let Some(price) = price {
                edit.price_per_share = price;
            }
            if let Some(shares) = shares {
                edit.total_shares = shares;
            }
            controller.save_edit().await?;
        }
        Command::Buy { id, quantity } => {
            require_login(&controller)?;
            controller.select_listing(&ListingId::new(id)).await?;
            let quantity = controller.set_buy_quantity(quantity);
            let amount = controller.open_payment()?.amount_eth();
            println!(
                "Paying {} for {quantity} share(s)...",
                estate_utils::format_eth(amount)
            );
            let result = controller.pay().await;
            if let Some(attempt) = &controller.state().payment {
                render::payment(attempt);
            }
            let tx_hash = result?;
            println!("Transaction: {}", render::explorer_link(&tx_hash));
        }
        Command::Config => {}
    }

    Ok(())
}

fn require_login(controller: &ViewController) -> anyhow::Result<()> {
    if controller.state().account.is_none() {
        bail!("not logged in; run `tokenestate connect` or `tokenestate demo-login` first");
    }
    Ok(())
}
