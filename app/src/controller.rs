//! The view controller: every user action and the state it changes.
//!
//! Handlers run one at a time and await each external call in turn. Writes
//! never touch local state directly; a successful write is always followed by
//! a full refetch from the data API.

use std::sync::Arc;
use tracing::{debug, info, warn};

use estate_market::{
    allocation, holdings, mock_history, net_worth_eth, owned_shares, palette_for, AllocationSlice,
    Holding, OsRandom, Palette, RandomSource, TrendChart,
};
use estate_store::{BuySharesRequest, KeyValueStore, RemoteDataClient, KEY_THEME, KEY_WALLET};
use estate_types::{Listing, ListingId, Theme, TxHash, WalletAddress};
use estate_utils::eth_to_usd;
use estate_wallet_core::{
    connect_wallet, PaymentAttempt, PaymentGateway, WalletBrand, WalletError,
};

use crate::forms::ListingEdit;
use crate::geo::{open_map, Geocoder};
use crate::notify::Notifier;
use crate::state::{AppState, View};
use crate::AppError;

/// Account used by "demo login".
pub const DEMO_ACCOUNT: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// Upper bound of the buy quantity selector.
pub const MAX_BUY_QUANTITY: u64 = 100;

pub struct ViewController {
    state: AppState,
    data: Arc<dyn RemoteDataClient>,
    prefs: Arc<dyn KeyValueStore>,
    gateway: PaymentGateway,
    notifier: Arc<dyn Notifier>,
    geocoder: Option<Arc<dyn Geocoder>>,
    rng: Arc<dyn RandomSource>,
}

impl ViewController {
    pub fn new(
        data: Arc<dyn RemoteDataClient>,
        prefs: Arc<dyn KeyValueStore>,
        gateway: PaymentGateway,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: AppState::new(),
            data,
            prefs,
            gateway,
            notifier,
            geocoder: None,
            rng: Arc::new(OsRandom),
        }
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    // ── Session ────────────────────────────────────────────────────────

    /// Reapply the saved theme and log back into the saved account.
    pub async fn restore(&mut self) {
        if self.read_pref(KEY_THEME).as_deref() == Some(Theme::Dark.as_str()) {
            self.state.theme = Theme::Dark;
        }
        let Some(saved) = self.read_pref(KEY_WALLET) else {
            return;
        };
        match WalletAddress::parse(saved) {
            Ok(account) => self.login_success(account).await,
            Err(e) => {
                warn!(error = %e, "discarding malformed saved account");
                self.remove_pref(KEY_WALLET);
            }
        }
    }

    /// Log in with the configured wallet provider.
    pub async fn connect_wallet(&mut self) -> Result<WalletAddress, AppError> {
        let account = connect_wallet(self.gateway.provider()).await?;
        self.login_success(account.clone()).await;
        Ok(account)
    }

    /// Log in as the demo account without a wallet.
    pub async fn demo_login(&mut self) -> WalletAddress {
        let account = WalletAddress::from_trusted(DEMO_ACCOUNT);
        self.login_success(account.clone()).await;
        account
    }

    pub async fn login_success(&mut self, account: WalletAddress) {
        info!(%account, "logged in");
        self.write_pref(KEY_WALLET, account.as_str());
        self.state.account = Some(account);
        self.fetch_data().await;
    }

    pub fn logout(&mut self) {
        if let Some(account) = self.state.account.take() {
            info!(%account, "logged out");
        }
        self.remove_pref(KEY_WALLET);
        self.state.portfolio.clear();
        self.state.payment = None;
        self.state.editing = None;
        self.state.selected = None;
        self.state.map = None;
        self.state.view = View::Landing;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.write_pref(KEY_THEME, self.state.theme.as_str());
        self.state.theme
    }

    /// Reload listings, then the account's portfolio.
    ///
    /// A failed read keeps whatever was loaded before.
    pub async fn fetch_data(&mut self) {
        self.state.loading = true;
        match self.data.fetch_listings().await {
            Ok(listings) => {
                debug!(count = listings.len(), "listings loaded");
                self.state.listings = listings;
            }
            Err(e) => warn!(error = %e, "failed to load listings"),
        }
        if let Some(account) = self.state.account.clone() {
            match self.data.fetch_portfolio(&account).await {
                Ok(portfolio) => {
                    debug!(count = portfolio.len(), "portfolio loaded");
                    self.state.portfolio = portfolio;
                }
                Err(e) => warn!(error = %e, "failed to load portfolio"),
            }
        }
        self.state.loading = false;
    }

    pub fn set_view(&mut self, view: View) {
        if view != View::Asset && self.state.map.take().is_some() {
            debug!("left asset view");
        }
        self.state.view = view;
    }

    // ── Seller ─────────────────────────────────────────────────────────

    /// Tokenize the property described by the mint form.
    pub async fn mint(&mut self) -> Result<(), AppError> {
        let account = self.state.account.clone().ok_or(AppError::NotConnected)?;
        let history = mock_history(self.state.mint_form.price_per_share, self.rng.as_ref());
        let listing = match self.state.mint_form.to_new_listing(&account, history) {
            Ok(listing) => listing,
            Err(e) => return Err(self.report("Error minting: ", e.into())),
        };

        if let Err(e) = self.data.insert_listing(&listing).await {
            return Err(self.report("Error minting: ", e.into()));
        }
        info!(title = %listing.title, shares = listing.total_shares, "listing minted");
        self.notifier.alert("Asset Tokenized!");
        self.set_view(View::Market);
        self.fetch_data().await;
        Ok(())
    }

    pub fn begin_edit(&mut self, id: &ListingId) -> Result<&mut ListingEdit, AppError> {
        let listing = self.state.listing(id).ok_or(AppError::NoSelection)?;
        let edit = ListingEdit::from_listing(listing);
        Ok(self.state.editing.insert(edit))
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
    }

    /// Save the edit in progress.
    pub async fn save_edit(&mut self) -> Result<(), AppError> {
        let edit = self.state.editing.clone().ok_or(AppError::NoSelection)?;
        let update = edit.to_update();
        if let Some(current) = self.state.listing(&edit.id) {
            if let Err(e) = update.check_against(current) {
                return Err(self.report("Failed to update: ", e.into()));
            }
        }

        if let Err(e) = self.data.update_listing(&edit.id, &update).await {
            return Err(self.report("Failed to update: ", e.into()));
        }
        info!(id = %edit.id, "listing updated");
        self.notifier.alert("Property Updated Successfully!");
        self.state.editing = None;
        self.fetch_data().await;
        Ok(())
    }

    // ── Purchase ───────────────────────────────────────────────────────

    /// Open the detail page of a listing, with a map when the address resolves.
    pub async fn select_listing(&mut self, id: &ListingId) -> Result<(), AppError> {
        let location = self
            .state
            .listing(id)
            .map(|l| l.location.clone())
            .ok_or(AppError::NoSelection)?;
        self.state.selected = Some(id.clone());
        self.state.buy_quantity = 1;
        self.set_view(View::Asset);

        // The previous map goes before the next one is requested.
        self.state.map = None;
        if let Some(geocoder) = self.geocoder.clone() {
            self.state.map = open_map(geocoder.as_ref(), &location).await;
        }
        Ok(())
    }

    /// Set the number of shares to buy, clamped to what can be bought.
    pub fn set_buy_quantity(&mut self, quantity: u64) -> u64 {
        let limit = self
            .state
            .selected_listing()
            .map(|l| l.available_shares.min(MAX_BUY_QUANTITY))
            .unwrap_or(MAX_BUY_QUANTITY)
            .max(1);
        self.state.buy_quantity = quantity.clamp(1, limit);
        self.state.buy_quantity
    }

    /// Cost in ETH of the current quantity of the selected listing.
    pub fn buy_total(&self) -> Option<f64> {
        self.state
            .selected_listing()
            .map(|l| l.cost_of(self.state.buy_quantity))
    }

    pub fn open_payment(&mut self) -> Result<&PaymentAttempt, AppError> {
        let amount = self.buy_total().ok_or(AppError::NoSelection)?;
        Ok(self
            .state
            .payment
            .get_or_insert_with(|| PaymentAttempt::new(amount)))
    }

    pub fn close_payment(&mut self) {
        self.state.payment = None;
    }

    /// Back to the input step after a failed payment.
    pub fn retry_payment(&mut self) -> bool {
        self.state
            .payment
            .as_mut()
            .map(PaymentAttempt::retry)
            .unwrap_or(false)
    }

    /// Pay for the open attempt and record the purchase once it confirms.
    ///
    /// Wallet failures stay on the attempt for the user to retry; a confirmed
    /// payment closes it whether or not the purchase could be recorded.
    pub async fn pay(&mut self) -> Result<TxHash, AppError> {
        let mut attempt = self.state.payment.take().ok_or(AppError::NoSelection)?;
        let gateway = self.gateway.clone();

        let this = &mut *self;
        let result = gateway
            .initiate(&mut attempt, move |hash| {
                // Moving the borrow in lets the callback's future hold it.
                let this = this;
                this.record_purchase(hash)
            })
            .await;

        match result {
            Ok(done) => {
                done.outcome?;
                Ok(done.tx_hash)
            }
            Err(e) => {
                if e == WalletError::WrongNetwork {
                    self.notifier
                        .alert("Please switch to Sepolia Network in MetaMask.");
                }
                self.state.payment = Some(attempt);
                Err(e.into())
            }
        }
    }

    /// Record a confirmed purchase of the selected listing.
    pub async fn record_purchase(&mut self, tx_hash: TxHash) -> Result<(), AppError> {
        let account = self.state.account.clone().ok_or(AppError::NotConnected)?;
        let listing = self
            .state
            .selected_listing()
            .ok_or(AppError::NoSelection)?;
        let request = BuySharesRequest {
            asset_id: listing.id.clone(),
            user_id: account,
            quantity: self.state.buy_quantity,
            total_price: listing.cost_of(self.state.buy_quantity),
        };

        if let Err(e) = self.data.buy_shares(&request).await {
            return Err(self.report("Transaction Failed in DB: ", e.into()));
        }
        info!(%tx_hash, asset = %request.asset_id, quantity = request.quantity, "purchase recorded");
        self.notifier
            .alert(&format!("Purchase Success! Proof: {}", tx_hash.short()));
        self.fetch_data().await;
        self.set_view(View::Landing);
        Ok(())
    }

    // ── Derived views ──────────────────────────────────────────────────

    /// Listings passing the market page's search, filter, and sort.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.state.query.apply(&self.state.listings)
    }

    /// Whether the market page should show its empty-results message.
    pub fn no_results(&self) -> bool {
        self.visible_listings().is_empty()
    }

    /// Listings minted by the logged-in account.
    pub fn seller_listings(&self) -> Vec<&Listing> {
        match &self.state.account {
            Some(account) => self
                .state
                .listings
                .iter()
                .filter(|l| l.is_listed_by(account))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn owned_shares(&self, id: &ListingId) -> u64 {
        owned_shares(&self.state.portfolio, id)
    }

    pub fn holdings(&self) -> Vec<Holding> {
        holdings(&self.state.portfolio, &self.state.listings)
    }

    pub fn net_worth_eth(&self) -> f64 {
        net_worth_eth(&self.state.portfolio, &self.state.listings)
    }

    pub fn net_worth_usd(&self) -> f64 {
        eth_to_usd(self.net_worth_eth())
    }

    pub fn allocation(&self) -> Vec<AllocationSlice> {
        allocation(&self.state.portfolio, &self.state.listings, self.state.theme)
    }

    /// Value history chart of the selected listing.
    pub fn trend_chart(&self) -> Option<TrendChart> {
        self.state
            .selected_listing()
            .and_then(|l| TrendChart::from_history(&l.history))
    }

    pub fn palette(&self, listing: &Listing) -> Palette {
        palette_for(&listing.palette_key(), self.state.theme)
    }

    /// Greeting name for the logged-in account.
    pub fn account_label(&self) -> &'static str {
        match &self.state.account {
            Some(a) if a.is_same_account(&WalletAddress::from_trusted(DEMO_ACCOUNT)) => "Kalash",
            _ => "Investor",
        }
    }

    /// Name of the wallet product, for the header badge.
    pub fn wallet_name(&self) -> String {
        self.gateway
            .provider()
            .map(|p| p.brand())
            .unwrap_or(WalletBrand::Generic)
            .to_string()
    }

    // ── Helpers ────────────────────────────────────────────────────────

    /// Alert the user with `prefix` and the error text, and hand the error back.
    fn report(&self, prefix: &str, error: AppError) -> AppError {
        warn!(error = %error, context = prefix.trim_end(), "action failed");
        self.notifier.alert(&format!("{prefix}{error}"));
        error
    }

    fn read_pref(&self, key: &str) -> Option<String> {
        self.prefs.get(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "failed to read preference");
            None
        })
    }

    fn write_pref(&self, key: &str, value: &str) {
        if let Err(e) = self.prefs.set(key, value) {
            warn!(key, error = %e, "failed to save preference");
        }
    }

    fn remove_pref(&self, key: &str) {
        if let Err(e) = self.prefs.remove(key) {
            warn!(key, error = %e, "failed to clear preference");
        }
    }
}
