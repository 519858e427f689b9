use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use time::PrimitiveDateTime;
use tracing::instrument;

/// A customer-submitted shipping quote request. Terminal from creation;
/// converting one into a shipment is a manual admin workflow elsewhere.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct QuoteRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub message: Option<String>,
    pub created_at: PrimitiveDateTime,
}

const QUOTE_COLUMNS: &str =
    "id, name, email, phone, origin, destination, weight, message, created_at";

#[derive(Debug, Clone)]
pub struct InsertQuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub message: Option<String>,
}

impl Processor<InsertQuoteRequest, Result<QuoteRequest, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:InsertQuoteRequest", err)]
    async fn process(&self, input: InsertQuoteRequest) -> Result<QuoteRequest, sqlx::Error> {
        sqlx::query_as::<_, QuoteRequest>(&format!(
            r#"
            INSERT INTO "intake"."quote_request"
                (name, email, phone, origin, destination, weight, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {QUOTE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.origin)
        .bind(&input.destination)
        .bind(input.weight)
        .bind(&input.message)
        .fetch_one(self.db())
        .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListQuoteRequests;

impl Processor<ListQuoteRequests, Result<Vec<QuoteRequest>, sqlx::Error>> for DatabaseProcessor {
    #[instrument(skip_all, name = "SQL:ListQuoteRequests", err)]
    async fn process(&self, _input: ListQuoteRequests) -> Result<Vec<QuoteRequest>, sqlx::Error> {
        sqlx::query_as::<_, QuoteRequest>(&format!(
            r#"
            SELECT {QUOTE_COLUMNS}
            FROM "intake"."quote_request"
            ORDER BY id DESC
            "#
        ))
        .fetch_all(self.db())
        .await
    }
}
