use crate::core::{RawRow, RowCursor, ServiceSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::time::Duration;

const CURSOR_NAME: &str = "services_export_cursor";

// Rows leave the database as one json column so the adapter stays untyped;
// every schema decision belongs to the validator. The ORDER BY keeps rows
// of one organization adjacent, which minimizes accumulator churn but is
// not required for correctness.
const SELECT_SERVICES: &str = r#"SELECT row_to_json(s) AS row FROM (
    SELECT id,
           name,
           organization_fiscal_code AS "organizationFiscalCode",
           organization_name        AS "organizationName",
           quality,
           scope,
           description
      FROM services
     ORDER BY organization_fiscal_code
) s"#;

/// Service row source backed by a pooled Postgres connection.
#[derive(Debug, Clone)]
pub struct PgServiceSource {
    pool: PgPool,
}

impl PgServiceSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ServiceSource for PgServiceSource {
    async fn open(&self) -> Result<Box<dyn RowCursor>> {
        // The transaction checks a connection out of the pool and scopes
        // both the connection and the cursor to this invocation: dropping
        // the cursor rolls the transaction back and returns the connection
        // on every exit path.
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!(
            "DECLARE {} NO SCROLL CURSOR FOR {}",
            CURSOR_NAME, SELECT_SERVICES
        ))
        .execute(&mut *tx)
        .await?;

        Ok(Box::new(PgRowCursor { tx }))
    }
}

struct PgRowCursor {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RowCursor for PgRowCursor {
    async fn next_page(&mut self, page_size: usize) -> Result<Vec<RawRow>> {
        let rows = sqlx::query(&format!("FETCH {} FROM {}", page_size, CURSOR_NAME))
            .fetch_all(&mut *self.tx)
            .await?;

        rows.iter()
            .map(|row| {
                let Json(value): Json<RawRow> = row.try_get("row")?;
                Ok(value)
            })
            .collect()
    }
}
