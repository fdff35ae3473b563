use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::types::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub route_id: Uuid,
    pub transaction_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: Option<String>,
    pub transaction_type: String,
    pub description: Option<String>,
    pub from_account_id: Option<Uuid>,
    pub to_account_id: Option<Uuid>,
    pub created_at: chrono::DateTime<Utc>,
}

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, route_id: Uuid) -> Result<Vec<TransactionRecord>, AppError> {
        let transactions = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM route_transactions WHERE route_id = $1 ORDER BY transaction_date, created_at",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing transactions: {}", e)))?;

        Ok(transactions)
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        transaction_date: NaiveDate,
        amount: Decimal,
        currency: String,
        payment_method: Option<String>,
        transaction_type: String,
        description: Option<String>,
        from_account_id: Option<Uuid>,
        to_account_id: Option<Uuid>,
    ) -> Result<TransactionRecord, AppError> {
        let id = Uuid::new_v4();

        let transaction = sqlx::query_as::<_, TransactionRecord>(
            r#"
            INSERT INTO route_transactions (id, route_id, transaction_date, amount, currency,
                                            payment_method, transaction_type, description,
                                            from_account_id, to_account_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(transaction_date)
        .bind(amount)
        .bind(currency)
        .bind(payment_method)
        .bind(transaction_type)
        .bind(description)
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating transaction: {}", e)))?;

        Ok(transaction)
    }
}
