//! Send a small payment to a handle.
//!
//! ```shell
//! PAYLINK_AUTH_TOKEN=<hex secret> cargo run --example send_payment -- <handle>
//! ```

use paylink::types::{PaymentParams, PaymentRequestItem};
use paylink::{AuthToken, ConnectClient, Environment};

#[tokio::main]
async fn main() -> paylink::Result<()> {
    env_logger::init();

    let destination = std::env::args().nth(1).expect("destination handle required");
    let token = AuthToken::from_hex(
        std::env::var("PAYLINK_AUTH_TOKEN").expect("PAYLINK_AUTH_TOKEN must be set"),
    )?;
    let client = ConnectClient::new(token, Environment::Beta);

    let result = client
        .wallet()
        .pay(PaymentParams {
            description: Some("paylink example".to_string()),
            app_action: "example".to_string(),
            payments: vec![PaymentRequestItem {
                destination,
                currency_code: "USD".to_string(),
                send_amount: 0.05,
            }],
            attachment: None,
        })
        .await?;

    println!(
        "paid {} sat (fees {} sat), transaction {}",
        result.satoshi_amount, result.satoshi_fees, result.transaction_id
    );

    Ok(())
}
