const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub vapi: VapiConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Missing key is not fatal: every generated turn falls back to the apology.
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct VapiConfig {
    /// Shared secret expected in `x-vapi-secret`. Unset means no check.
    pub webhook_secret: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!("Loaded .env from {}", path.display()),
            Err(e) if e.not_found() => {
                tracing::debug!("No .env file found, using environment only");
            }
            Err(e) => tracing::warn!("Failed to parse .env: {e}"),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "PORT is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            server: ServerConfig {
                host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            openai: OpenAiConfig {
                api_key: non_empty("OPENAI_API_KEY"),
                base_url: non_empty("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            },
            vapi: VapiConfig {
                webhook_secret: non_empty("VAPI_WEBHOOK_SECRET"),
            },
        }
    }
}
