use crate::dto::transaction_dto::{CreateTransactionRequest, TransactionResponse};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::{decimal_from_f64, require_string, require_value};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct TransactionController {
    repository: TransactionRepository,
    routes: RouteRepository,
}

impl TransactionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TransactionRepository::new(pool.clone()),
            routes: RouteRepository::new(pool),
        }
    }

    pub async fn list(&self, route_id: Uuid) -> Result<Vec<TransactionResponse>, AppError> {
        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let transactions = self.repository.find_by_route(route_id).await?;
        Ok(transactions.into_iter().map(TransactionResponse::from).collect())
    }

    pub async fn create(
        &self,
        route_id: Uuid,
        request: CreateTransactionRequest,
        default_currency: &str,
    ) -> Result<TransactionResponse, AppError> {
        request.validate()?;

        let transaction_date =
            require_value(request.transaction_date, "Transaction date is required")?;
        let amount = require_value(request.amount, "Amount is required")?;
        let amount = decimal_from_f64(amount, "Invalid amount value")?;
        let transaction_type =
            require_string(request.transaction_type, "Transaction type is required")?;
        let currency = request
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_currency.to_string());

        if !self.routes.exists(route_id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }

        let transaction = self
            .repository
            .create(
                route_id,
                transaction_date,
                amount,
                currency,
                request.payment_method,
                transaction_type,
                request.description,
                request.from_account_id,
                request.to_account_id,
            )
            .await?;

        Ok(transaction.into())
    }
}
