use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres, Transaction};

use crate::{conf::settings, pkg::internal::token::TokenService, prelude::Result};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

pub trait GetTxn {
    fn begin_txn(
        &self,
    ) -> impl std::future::Future<Output = Result<Transaction<'static, Postgres>>> + Send;
}

impl GetTxn for Arc<PgPool> {
    async fn begin_txn(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.begin().await?)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
            tokens: Arc::new(TokenService::new(&settings.jwt_secret)),
        })
    }
}
