//! Nullable wallet: a scripted provider that records what it was asked to do.

use async_trait::async_trait;
use std::sync::Mutex;

use estate_types::{ChainId, EthAmount, TxHash, WalletAddress};
use estate_wallet_core::{Receipt, TransferRequest, WalletBrand, WalletError, WalletProvider};

/// A deterministic [`WalletProvider`].
///
/// Defaults to one unlocked account on Sepolia holding 1 ETH, accepting
/// network switches and confirming every transfer in block 1.
pub struct NullWallet {
    brand: WalletBrand,
    accounts: Vec<WalletAddress>,
    chain: Mutex<ChainId>,
    balance: EthAmount,
    gas_price: EthAmount,
    allow_switch: bool,
    reject_connection: bool,
    revert: bool,
    send_error: Option<String>,
    fixed_hash: Option<TxHash>,
    sent: Mutex<Vec<TransferRequest>>,
    switch_requests: Mutex<Vec<ChainId>>,
}

impl NullWallet {
    pub fn new(account: WalletAddress) -> Self {
        Self {
            brand: WalletBrand::MetaMask,
            accounts: vec![account],
            chain: Mutex::new(ChainId::SEPOLIA),
            balance: EthAmount::from_wei(1_000_000_000_000_000_000),
            gas_price: EthAmount::from_wei(20_000_000_000),
            allow_switch: true,
            reject_connection: false,
            revert: false,
            send_error: None,
            fixed_hash: None,
            sent: Mutex::new(Vec::new()),
            switch_requests: Mutex::new(Vec::new()),
        }
    }

    /// A wallet that is installed but exposes no accounts.
    pub fn locked() -> Self {
        let mut wallet = Self::new(WalletAddress::from_trusted(
            "0x0000000000000000000000000000000000000000",
        ));
        wallet.accounts.clear();
        wallet
    }

    pub fn with_brand(mut self, brand: WalletBrand) -> Self {
        self.brand = brand;
        self
    }

    pub fn on_chain(self, chain: ChainId) -> Self {
        *self.chain.lock().unwrap() = chain;
        self
    }

    pub fn with_balance(mut self, balance: EthAmount) -> Self {
        self.balance = balance;
        self
    }

    /// Decline every `switch_chain` request.
    pub fn declining_switch(mut self) -> Self {
        self.allow_switch = false;
        self
    }

    /// Fail `request_accounts` as if the user dismissed the prompt.
    pub fn rejecting_connection(mut self) -> Self {
        self.reject_connection = true;
        self
    }

    /// Mine every transfer with a failed status.
    pub fn reverting(mut self) -> Self {
        self.revert = true;
        self
    }

    /// Fail `send_transaction` with `message`.
    pub fn failing_send(mut self, message: impl Into<String>) -> Self {
        self.send_error = Some(message.into());
        self
    }

    /// Return `hash` for every transfer instead of a generated one.
    pub fn with_hash(mut self, hash: TxHash) -> Self {
        self.fixed_hash = Some(hash);
        self
    }

    /// Transfers submitted so far.
    pub fn sent(&self) -> Vec<TransferRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Chains the wallet was asked to switch to.
    pub fn switch_requests(&self) -> Vec<ChainId> {
        self.switch_requests.lock().unwrap().clone()
    }

    fn hash_for(&self, index: usize) -> TxHash {
        match &self.fixed_hash {
            Some(hash) => hash.clone(),
            None => TxHash::parse(format!("0x{:064x}", index + 1)).unwrap(),
        }
    }
}

#[async_trait]
impl WalletProvider for NullWallet {
    fn brand(&self) -> WalletBrand {
        self.brand
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        if self.reject_connection {
            return Err(WalletError::Provider("User rejected the request.".into()));
        }
        Ok(self.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        Ok(*self.chain.lock().unwrap())
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), WalletError> {
        self.switch_requests.lock().unwrap().push(chain);
        if !self.allow_switch {
            return Err(WalletError::Provider("User rejected the request.".into()));
        }
        *self.chain.lock().unwrap() = chain;
        Ok(())
    }

    async fn balance(&self, _account: &WalletAddress) -> Result<EthAmount, WalletError> {
        Ok(self.balance)
    }

    async fn gas_price(&self) -> Result<EthAmount, WalletError> {
        Ok(self.gas_price)
    }

    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxHash, WalletError> {
        if let Some(message) = &self.send_error {
            return Err(WalletError::Provider(message.clone()));
        }
        let mut sent = self.sent.lock().unwrap();
        let hash = self.hash_for(sent.len());
        sent.push(tx.clone());
        Ok(hash)
    }

    async fn wait_for_confirmation(&self, hash: &TxHash) -> Result<Receipt, WalletError> {
        Ok(Receipt {
            tx_hash: hash.clone(),
            block_number: 1,
            success: !self.revert,
        })
    }
}
