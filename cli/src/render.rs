//! Plain-text rendering of the controller's views.

use estate_app::ViewController;
use estate_market::classify;
use estate_types::{Listing, TxHash};
use estate_utils::format::group_thousands;
use estate_utils::{eth_to_usd, format_eth, format_usd, short_address};
use estate_wallet_core::{PaymentAttempt, PaymentStep};

const EXPLORER_URL: &str = "https://sepolia.etherscan.io";

pub fn explorer_link(hash: &TxHash) -> String {
    hash.explorer_url(EXPLORER_URL)
}

fn listing_line(controller: &ViewController, listing: &Listing) -> String {
    let palette = controller.palette(listing);
    format!(
        "[{id:>4}] {title} ({category}) - {location}\n       {price}/share  {yield_pct}% yield  {available}/{total} available ({pct}%)  {accent}",
        id = listing.id,
        title = listing.title,
        category = classify(&listing.title),
        location = listing.primary_location(),
        price = format_eth(listing.price_per_share),
        yield_pct = listing.yield_pct,
        available = group_thousands(listing.available_shares),
        total = group_thousands(listing.total_shares),
        pct = listing.availability_pct(),
        accent = palette.accent,
    )
}

pub fn market(controller: &ViewController) {
    let query = &controller.state().query;
    println!(
        "Market  search={:?} type={} sort={}",
        query.search, query.category, query.sort
    );
    if controller.no_results() {
        println!("No properties found matching your criteria.");
        return;
    }
    for listing in controller.visible_listings() {
        println!("{}", listing_line(controller, listing));
    }
}

pub fn asset(controller: &ViewController) {
    let Some(listing) = controller.state().selected_listing() else {
        return;
    };
    println!("{}", listing_line(controller, listing));
    println!("       Location: {}", listing.location);
    if let Some(description) = &listing.description {
        println!("       {description}");
    }
    if let Some(image) = listing.image_or_placeholder() {
        println!("       Image: {image}");
    }
    let owned = controller.owned_shares(&listing.id);
    if owned > 0 {
        println!("       You own {} share(s)", group_thousands(owned));
    }

    if let Some(chart) = controller.trend_chart() {
        let months: Vec<String> = listing
            .history
            .iter()
            .map(|p| format!("{} {}", p.month, format_eth(p.value)))
            .collect();
        println!("       Trend: {}", months.join("  "));
        println!("       Range: {} - {}", format_eth(chart.min), format_eth(chart.max));
        let grid: Vec<String> = chart.gridline_values().into_iter().map(format_eth).collect();
        println!("       Gridlines: {}", grid.join(" | "));
    }
    match &controller.state().map {
        Some(map) => println!(
            "       Map: {:.5}, {:.5} (zoom {})",
            map.center.lat, map.center.lng, map.zoom
        ),
        None => println!("       Map unavailable"),
    }
}

pub fn portfolio(controller: &ViewController) {
    if let Some(account) = &controller.state().account {
        println!(
            "Welcome back, {} ({})",
            controller.account_label(),
            short_address(account)
        );
    }
    let worth = controller.net_worth_eth();
    println!(
        "Net worth: {} ({})",
        format_eth(worth),
        format_usd(eth_to_usd(worth))
    );

    let holdings = controller.holdings();
    if holdings.is_empty() {
        println!("No holdings yet.");
        return;
    }
    for holding in &holdings {
        println!(
            "  {} x{}  paid {}  now {}",
            holding.title,
            group_thousands(holding.shares),
            format_eth(holding.cost_eth),
            format_eth(holding.value_eth)
        );
    }
    println!("Allocation:");
    for slice in controller.allocation() {
        let proof = slice
            .tx_hash
            .as_ref()
            .map(|h| format!("  proof {}", h.short()))
            .unwrap_or_default();
        println!("  {:>3}%  {}  {}{proof}", slice.percent, slice.name, slice.color);
    }
}

pub fn seller(controller: &ViewController) {
    let listings = controller.seller_listings();
    if listings.is_empty() {
        println!("You have not tokenized any properties yet.");
        return;
    }
    for listing in listings {
        println!("{}", listing_line(controller, listing));
        println!("       Sold: {}", group_thousands(listing.sold_shares()));
    }
}

pub fn payment(attempt: &PaymentAttempt) {
    match attempt.step() {
        PaymentStep::Error => println!(
            "Payment failed: {}",
            attempt.error_message().unwrap_or("unknown error")
        ),
        step => println!("Payment {step}"),
    }
}
