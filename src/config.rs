use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL joined with each unit's QR path to form a renderable image URL.
    pub qr_base_url: String,
    /// Upstream product/stock source. When unset the store starts empty.
    pub backend_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let qr_base_url =
            env::var("QR_BASE_URL").unwrap_or_else(|_| "https://stock.example.com/qr".to_string());
        let backend_url = env::var("STOCK_BACKEND_URL").ok().filter(|v| !v.is_empty());
        Ok(Self {
            host,
            port,
            qr_base_url,
            backend_url,
        })
    }
}
