use crate::repositories::transaction_repository::TransactionRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para registrar un pago de la ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub transaction_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub currency: Option<String>,

    #[validate(length(max = 100))]
    pub payment_method: Option<String>,

    #[serde(rename = "type")]
    pub transaction_type: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub from_account_id: Option<Uuid>,
    pub to_account_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub route_id: Uuid,
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    pub payment_method: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub description: Option<String>,
    pub from_account_id: Option<Uuid>,
    pub to_account_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(transaction: TransactionRecord) -> Self {
        Self {
            id: transaction.id,
            route_id: transaction.route_id,
            transaction_date: transaction.transaction_date,
            amount: transaction.amount.to_string().parse().unwrap_or(0.0),
            currency: transaction.currency,
            payment_method: transaction.payment_method,
            transaction_type: transaction.transaction_type,
            description: transaction.description,
            from_account_id: transaction.from_account_id,
            to_account_id: transaction.to_account_id,
            created_at: transaction.created_at,
        }
    }
}
