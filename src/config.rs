// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gateway_api_key: String,
    pub gateway_environment: String,
    pub gateway_notify_url: String,
    pub gateway_return_url: String,
    pub payment_channel: String,
    pub currency: String,
    /// The platform's own merchant identity with the gateway. Receives the
    /// commission split, and the vendor split when a vendor has no
    /// settlement identity of its own.
    pub platform_merchant_id: String,
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let gateway_environment =
            env::var("GATEWAY_ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string());

        AppConfig {
            gateway_api_key: env::var("GATEWAY_API_KEY")
                .expect("GATEWAY_API_KEY must be set"),
            gateway_environment,
            gateway_notify_url: env::var("GATEWAY_NOTIFY_URL")
                .expect("GATEWAY_NOTIFY_URL must be set"),
            gateway_return_url: env::var("GATEWAY_RETURN_URL")
                .expect("GATEWAY_RETURN_URL must be set"),
            payment_channel: env::var("PAYMENT_CHANNEL")
                .unwrap_or_else(|_| "mobile_money".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "XAF".to_string()),
            platform_merchant_id: env::var("PLATFORM_MERCHANT_ID")
                .expect("PLATFORM_MERCHANT_ID must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "marketpay".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.gateway_environment == "production"
    }

    /// (initiate_url, verify_base_url) for the configured gateway environment.
    pub fn gateway_urls(&self) -> (String, String) {
        let base_url = if self.is_production() {
            "https://api.payunit.africa/v1"
        } else {
            "https://sandbox.payunit.africa/v1"
        };

        let initiate_url = format!("{}/transactions/initiate", base_url);
        let verify_base_url = format!("{}/transactions", base_url);

        (initiate_url, verify_base_url)
    }
}
