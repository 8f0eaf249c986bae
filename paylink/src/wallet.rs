//! Wallet endpoint wrappers.

use crate::constants::WALLET_BASE;
use crate::types::{ExchangeRate, PaymentParams, PaymentResult, SpendableBalance};
use crate::ConnectClient;
use http::Method;
use paylink_core::{Error, Result};

/// Wallet surface of the Connect API.
///
/// Obtained from [`ConnectClient::wallet`]; each method is a single signed
/// REST call.
pub struct WalletClient<'a> {
    client: &'a ConnectClient,
}

impl<'a> WalletClient<'a> {
    pub(crate) fn new(client: &'a ConnectClient) -> Self {
        Self { client }
    }

    /// Fetch the spendable balance, converted to `currency_code` when given,
    /// to the user's local currency otherwise.
    pub async fn spendable_balance(&self, currency_code: Option<&str>) -> Result<SpendableBalance> {
        let query: Vec<(&str, String)> = currency_code
            .into_iter()
            .map(|c| ("currencyCode", c.to_string()))
            .collect();
        self.client
            .request_as(
                Method::GET,
                &format!("{WALLET_BASE}/spendableBalance"),
                &query,
                None,
                None,
            )
            .await
    }

    /// Fetch the current exchange rate for a fiat currency.
    pub async fn exchange_rate(&self, currency_code: &str) -> Result<ExchangeRate> {
        self.client
            .request_as(
                Method::GET,
                &format!("{WALLET_BASE}/exchangeRate/{currency_code}"),
                &[],
                None,
                None,
            )
            .await
    }

    /// Look up a settled payment by transaction id.
    pub async fn payment(&self, transaction_id: &str) -> Result<PaymentResult> {
        self.client
            .request_as(
                Method::GET,
                &format!("{WALLET_BASE}/payment"),
                &[("transactionId", transaction_id.to_string())],
                None,
                None,
            )
            .await
    }

    /// Execute a payment.
    ///
    /// The wire format calls the receiver list `receivers` while this API
    /// calls it `payments`; the rename happens here, before the key-casing
    /// transform.
    pub async fn pay(&self, params: PaymentParams) -> Result<PaymentResult> {
        let mut body = serde_json::to_value(&params)?;
        let map = body
            .as_object_mut()
            .ok_or_else(|| Error::unexpected("payment params must serialize to an object"))?;
        if let Some(payments) = map.remove("payments") {
            map.insert("receivers".to_string(), payments);
        }

        self.client
            .request_as(
                Method::POST,
                &format!("{WALLET_BASE}/pay"),
                &[],
                Some(body),
                None,
            )
            .await
    }
}
