use estate_nullables::{NullDataClient, NullKeyValueStore, NullWallet};
use estate_store::{BuySharesRequest, KeyValueStore, RemoteDataClient, StoreError, KEY_THEME};
use estate_types::{ChainId, Listing, ListingId, ListingUpdate, WalletAddress};
use estate_wallet_core::WalletProvider;

fn buyer() -> WalletAddress {
    WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
}

fn villa() -> Listing {
    Listing {
        id: ListingId::new("7"),
        title: "Oceanfront Villa".into(),
        location: "Malibu, CA".into(),
        price_per_share: 0.05,
        yield_pct: 6.5,
        available_shares: 1000,
        total_shares: 1000,
        image_url: None,
        description: None,
        seller_id: None,
        history: Vec::new(),
        created_at: None,
    }
}

fn purchase(quantity: u64) -> BuySharesRequest {
    BuySharesRequest {
        asset_id: ListingId::new("7"),
        user_id: buyer(),
        quantity,
        total_price: quantity as f64 * 0.05,
    }
}

#[tokio::test]
async fn purchase_moves_shares_into_portfolio() {
    let data = NullDataClient::with_listings(vec![villa()]);
    data.buy_shares(&purchase(10)).await.unwrap();

    assert_eq!(data.listing(&ListingId::new("7")).unwrap().available_shares, 990);
    let owned = data.fetch_portfolio(&buyer()).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].shares, 10);
}

#[tokio::test]
async fn purchase_never_oversells() {
    let data = NullDataClient::with_listings(vec![villa()]);
    let err = data.buy_shares(&purchase(1001)).await.unwrap_err();
    assert_eq!(err.to_string(), "Not enough shares available");
    assert_eq!(data.listing(&ListingId::new("7")).unwrap().available_shares, 1000);
    assert!(data.portfolio_rows().is_empty());
}

#[tokio::test]
async fn update_rejects_total_below_available() {
    let data = NullDataClient::with_listings(vec![villa()]);
    let shrink = ListingUpdate {
        price_per_share: 0.06,
        total_shares: 10,
    };
    assert!(matches!(
        data.update_listing(&ListingId::new("7"), &shrink).await,
        Err(StoreError::Rejected(_))
    ));
}

#[tokio::test]
async fn scripted_failures_apply_once() {
    let data = NullDataClient::with_listings(vec![villa()]);
    data.fail_next_write("permission denied");
    let err = data.buy_shares(&purchase(1)).await.unwrap_err();
    assert_eq!(err.to_string(), "permission denied");
    data.buy_shares(&purchase(1)).await.unwrap();

    data.fail_reads(Some("offline"));
    assert!(data.fetch_listings().await.is_err());
    data.fail_reads(None);
    assert_eq!(data.fetch_listings().await.unwrap().len(), 1);
    assert_eq!(data.listing_fetches(), 2);
}

#[tokio::test]
async fn wallet_records_switch_requests() {
    let wallet = NullWallet::new(buyer()).on_chain(ChainId::MAINNET);
    wallet.switch_chain(ChainId::SEPOLIA).await.unwrap();
    assert_eq!(wallet.chain_id().await.unwrap(), ChainId::SEPOLIA);
    assert_eq!(wallet.switch_requests(), vec![ChainId::SEPOLIA]);

    let stubborn = NullWallet::new(buyer())
        .on_chain(ChainId::MAINNET)
        .declining_switch();
    assert!(stubborn.switch_chain(ChainId::SEPOLIA).await.is_err());
    assert_eq!(stubborn.chain_id().await.unwrap(), ChainId::MAINNET);
}

#[test]
fn preference_store_round_trip() {
    let kv = NullKeyValueStore::with_entries([(KEY_THEME, "dark")]);
    assert_eq!(kv.get(KEY_THEME).unwrap().as_deref(), Some("dark"));
    kv.remove(KEY_THEME).unwrap();
    assert_eq!(kv.peek(KEY_THEME), None);
}
