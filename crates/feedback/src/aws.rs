//! Shared AWS SDK configuration for the managed backends.

use aws_config::{BehaviorVersion, Region, SdkConfig};

#[cfg(feature = "dynamodb")]
use aws_sdk_dynamodb::config::Credentials;
#[cfg(all(feature = "ses", not(feature = "dynamodb")))]
use aws_sdk_sesv2::config::Credentials;

use crate::config::Config;

/// Loads the SDK configuration used to construct every AWS client.
///
/// Static credentials from the environment take precedence. Without them the
/// default provider chain is used and a warning is logged; startup continues.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        tracing::info!(endpoint = %endpoint, "Using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    match &config.credentials {
        Some(creds) => {
            loader = loader.credentials_provider(Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                None,
                None,
                "feedback-environment",
            ));
        }
        None => {
            tracing::warn!(
                "ACCESS_KEY_ID or SECRET_ACCESS_KEY not set, falling back to the default AWS credential chain"
            );
        }
    }

    loader.load().await
}
