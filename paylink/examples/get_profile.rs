//! Fetch the authenticated user's profile and balance.
//!
//! ```shell
//! PAYLINK_AUTH_TOKEN=<hex secret> cargo run --example get_profile
//! ```

use paylink::{AuthToken, ConnectClient, Environment};

#[tokio::main]
async fn main() -> paylink::Result<()> {
    env_logger::init();

    let token = AuthToken::from_hex(
        std::env::var("PAYLINK_AUTH_TOKEN").expect("PAYLINK_AUTH_TOKEN must be set"),
    )?;
    let client = ConnectClient::new(token, Environment::Production);

    let profile = client.profile().current_profile().await?;
    println!("handle: {}", profile.public_profile.handle);

    let balance = client.wallet().spendable_balance(None).await?;
    println!(
        "spendable: {} sat ({} {})",
        balance.spendable_satoshi_balance, balance.spendable_fiat_balance, balance.currency_code
    );

    Ok(())
}
