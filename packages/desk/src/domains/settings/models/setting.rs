use anyhow::Result;
use sqlx::PgPool;

/// Setting model - key/value configuration rows.
///
/// Seeded by the initial migration with `admin_phone` and `sms_enabled`.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

impl Setting {
    /// Read a setting's value.
    pub async fn get(key: &str, pool: &PgPool) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
