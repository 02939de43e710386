use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::auth::errors::AppRegistryError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AppRegistry;

pub struct PostgresAppRegistry {
    pool: PgPool,
}

impl PostgresAppRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AppRow {
    id: i64,
    name: String,
    secret: String,
}

impl From<AppRow> for App {
    fn from(row: AppRow) -> Self {
        App {
            id: AppId(row.id),
            name: row.name,
            secret: row.secret,
        }
    }
}

#[async_trait]
impl AppRegistry for PostgresAppRegistry {
    async fn app_by_id(&self, id: AppId) -> Result<App, AppRegistryError> {
        let row: Option<AppRow> = sqlx::query_as(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppRegistryError::Database(e.to_string()))?;

        match row {
            Some(row) => Ok(row.into()),
            None => Err(AppRegistryError::AppNotFound),
        }
    }
}
