use std::env;

use secrecy::SecretString;

/// Categories featured on the storefront home page when nothing is configured.
pub const DEFAULT_FEATURED_CATEGORIES: [i64; 2] = [1, 2];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub supabase: SupabaseConfig,
    pub featured_category_ids: Vec<i64>,
}

/// Credentials for the hosted backend. Secrets stay wrapped so they never hit logs.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: SecretString,
    pub jwt_secret: SecretString,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = database_url()?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let supabase = SupabaseConfig {
            url: env::var("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            service_role_key: SecretString::from(env::var("SUPABASE_SERVICE_ROLE_KEY")?),
            jwt_secret: SecretString::from(env::var("SUPABASE_JWT_SECRET")?),
        };

        let featured_category_ids = match env::var("FEATURED_CATEGORY_IDS") {
            Ok(raw) => parse_id_list(&raw)?,
            Err(_) => DEFAULT_FEATURED_CATEGORIES.to_vec(),
        };

        Ok(Self {
            port,
            database_url,
            host,
            supabase,
            featured_category_ids,
        })
    }
}

/// The only setting the migrate and seed tools need.
pub fn database_url() -> anyhow::Result<String> {
    env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))
}

/// Parses a comma separated id list such as `"1, 2,7"`. Blank entries are skipped.
pub fn parse_id_list(raw: &str) -> anyhow::Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| anyhow::anyhow!("invalid category id {s:?}: {e}"))
        })
        .collect()
}
