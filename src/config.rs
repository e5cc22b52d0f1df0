#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub port: u16,
    // Chapa payment gateway
    pub chapa_secret_key: String,
    pub chapa_api_url: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");

        let chapa_secret_key = std::env::var("CHAPA_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());
        let chapa_api_url = std::env::var("CHAPA_API_URL")
            .unwrap_or_else(|_| "https://api.chapa.co/v1".to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        Config {
            database_url,
            app_url,
            port,
            chapa_secret_key,
            chapa_api_url,
        }
    }
}
