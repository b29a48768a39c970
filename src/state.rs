use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    baas::SupabaseClient,
    cart::CartStore,
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn, create_pool},
    location::LocationStore,
    middleware::auth::AuthSettings,
    storage::MemoryStorage,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub baas: SupabaseClient,
    pub auth: AuthSettings,
    pub carts: CartStore<MemoryStorage>,
    pub locations: LocationStore<MemoryStorage>,
    pub featured_category_ids: Arc<[i64]>,
}

impl AppState {
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url).await?;
        let orm = create_orm_conn(&config.database_url).await?;
        let baas = SupabaseClient::new(&config.supabase.url, config.supabase.service_role_key.clone())?;

        let storage = Arc::new(MemoryStorage::new());

        Ok(Self {
            pool,
            orm,
            baas,
            auth: AuthSettings::new(&config.supabase.jwt_secret),
            carts: CartStore::new(Arc::clone(&storage)),
            locations: LocationStore::new(storage),
            featured_category_ids: config.featured_category_ids.clone().into(),
        })
    }
}

impl FromRef<AppState> for AuthSettings {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
