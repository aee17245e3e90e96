//! [`WalletProvider`] over Ethereum JSON-RPC.
//!
//! Works against any endpoint that signs for its own accounts: a local dev
//! node, a signer proxy, or a wallet bridge exposing the EIP-1193 methods
//! over HTTP.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use estate_types::{ChainId, EthAmount, TxHash, WalletAddress};

use crate::provider::{Receipt, TransferRequest, WalletBrand, WalletProvider};
use crate::WalletError;

/// EIP-1193 code for a request the user dismissed.
pub const USER_REJECTED_CODE: i64 = 4001;

/// HTTP client for a JSON-RPC wallet endpoint.
pub struct JsonRpcWallet {
    http: reqwest::Client,
    url: String,
    brand: WalletBrand,
    next_id: AtomicU64,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl JsonRpcWallet {
    pub fn new(url: impl Into<String>, brand: WalletBrand) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Provider(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            brand,
            next_id: AtomicU64::new(1),
            poll_interval: Duration::from_secs(2),
            confirmation_timeout: Duration::from_secs(300),
        })
    }

    /// How often and for how long to poll for a receipt.
    pub fn with_confirmation_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.confirmation_timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "wallet rpc");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Provider(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Provider(format!(
                "wallet endpoint returned HTTP {}",
                response.status()
            )));
        }

        let reply: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Provider(format!("invalid JSON response: {e}")))?;

        if let Some(err) = reply.error {
            if err.code == USER_REJECTED_CODE {
                info!(method, "user rejected wallet request");
            } else {
                warn!(method, code = err.code, message = %err.message, "wallet rpc error");
            }
            return Err(WalletError::Provider(err.message));
        }
        Ok(reply.result.unwrap_or(Value::Null))
    }

    async fn call_string(&self, method: &str, params: Value) -> Result<String, WalletError> {
        let value = self.rpc_call(method, params).await?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| invalid(method, &value))
    }

    async fn call_accounts(&self, method: &str) -> Result<Vec<WalletAddress>, WalletError> {
        let value = self.rpc_call(method, json!([])).await?;
        parse_accounts(&value).ok_or_else(|| invalid(method, &value))
    }
}

fn invalid(method: &str, value: &Value) -> WalletError {
    WalletError::Provider(format!("invalid {method} response: {value}"))
}

fn parse_accounts(value: &Value) -> Option<Vec<WalletAddress>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().and_then(|s| WalletAddress::parse(s).ok()))
        .collect()
}

/// `eth_sendTransaction` parameter object.
fn transfer_params(tx: &TransferRequest) -> Value {
    json!([{
        "from": tx.from.as_str(),
        "to": tx.to.as_str(),
        "value": tx.value.to_hex_quantity(),
        "gas": format!("{:#x}", tx.gas_limit),
        "gasPrice": tx.gas_price.to_hex_quantity(),
    }])
}

/// Decode an `eth_getTransactionReceipt` result. `Ok(None)` while pending.
fn parse_receipt(hash: &TxHash, value: &Value) -> Result<Option<Receipt>, WalletError> {
    if value.is_null() {
        return Ok(None);
    }
    let quantity = |field: &str| -> Result<u64, WalletError> {
        let raw = value
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("eth_getTransactionReceipt", value))?;
        let digits = raw.strip_prefix("0x").unwrap_or(raw);
        u64::from_str_radix(digits, 16).map_err(|_| invalid("eth_getTransactionReceipt", value))
    };
    Ok(Some(Receipt {
        tx_hash: hash.clone(),
        block_number: quantity("blockNumber")?,
        success: quantity("status")? == 1,
    }))
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    fn brand(&self) -> WalletBrand {
        self.brand
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        self.call_accounts("eth_requestAccounts").await
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletError> {
        self.call_accounts("eth_accounts").await
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        let raw = self.call_string("eth_chainId", json!([])).await?;
        ChainId::from_hex(&raw).map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn switch_chain(&self, chain: ChainId) -> Result<(), WalletError> {
        self.rpc_call(
            "wallet_switchEthereumChain",
            json!([{ "chainId": chain.to_hex() }]),
        )
        .await?;
        Ok(())
    }

    async fn balance(&self, account: &WalletAddress) -> Result<EthAmount, WalletError> {
        let raw = self
            .call_string("eth_getBalance", json!([account.as_str(), "latest"]))
            .await?;
        EthAmount::from_hex_quantity(&raw).map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn gas_price(&self) -> Result<EthAmount, WalletError> {
        let raw = self.call_string("eth_gasPrice", json!([])).await?;
        EthAmount::from_hex_quantity(&raw).map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxHash, WalletError> {
        let raw = self
            .call_string("eth_sendTransaction", transfer_params(tx))
            .await?;
        let hash = TxHash::parse(raw).map_err(|e| WalletError::Provider(e.to_string()))?;
        info!(tx_hash = %hash, "transaction sent");
        Ok(hash)
    }

    async fn wait_for_confirmation(&self, hash: &TxHash) -> Result<Receipt, WalletError> {
        let deadline = Instant::now() + self.confirmation_timeout;
        loop {
            let value = self
                .rpc_call("eth_getTransactionReceipt", json!([hash.as_str()]))
                .await?;
            if let Some(receipt) = parse_receipt(hash, &value)? {
                debug!(tx_hash = %hash, block = receipt.block_number, "transaction mined");
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(WalletError::Transaction(format!(
                    "transaction {} not confirmed within {}s",
                    hash.short(),
                    self.confirmation_timeout.as_secs()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> TxHash {
        TxHash::parse(format!("0x{}", "ab".repeat(32))).unwrap()
    }

    #[test]
    fn transfer_params_use_hex_quantities() {
        let tx = TransferRequest {
            from: WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap(),
            to: WalletAddress::parse("0x71C7656EC7ab88b098defB751B7401B5f6d8976F").unwrap(),
            value: EthAmount::parse_ether("0.5").unwrap(),
            gas_limit: 100_000,
            gas_price: EthAmount::from_wei(20_000_000_000),
        };
        let params = transfer_params(&tx);
        assert_eq!(params[0]["value"], "0x6f05b59d3b20000");
        assert_eq!(params[0]["gas"], "0x186a0");
        assert_eq!(params[0]["gasPrice"], "0x4a817c800");
        assert_eq!(params[0]["to"], "0x71C7656EC7ab88b098defB751B7401B5f6d8976F");
    }

    #[test]
    fn pending_receipt_is_none() {
        assert_eq!(parse_receipt(&hash(), &Value::Null).unwrap(), None);
    }

    #[test]
    fn reverted_receipt_is_unsuccessful() {
        let mined = json!({ "blockNumber": "0x10", "status": "0x1" });
        let reverted = json!({ "blockNumber": "0x11", "status": "0x0" });
        let ok = parse_receipt(&hash(), &mined).unwrap().unwrap();
        assert!(ok.success);
        assert_eq!(ok.block_number, 16);
        assert!(!parse_receipt(&hash(), &reverted).unwrap().unwrap().success);
        assert!(parse_receipt(&hash(), &json!({ "status": "0x1" })).is_err());
    }

    #[test]
    fn accounts_must_all_be_addresses() {
        let good = json!(["0x71C7656EC7ab88b098defB751B7401B5f6d8976F"]);
        assert_eq!(parse_accounts(&good).unwrap().len(), 1);
        assert!(parse_accounts(&json!(["nope"])).is_none());
        assert_eq!(parse_accounts(&json!([])).unwrap().len(), 0);
    }
}
