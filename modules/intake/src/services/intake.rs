use framework::sqlx::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::entities::contact_message::{ContactMessage, InsertContactMessage, ListContactMessages};
use crate::entities::quote_request::{InsertQuoteRequest, ListQuoteRequests, QuoteRequest};
use crate::Error;

#[derive(Clone)]
pub struct IntakeService {
    pub db: DatabaseProcessor,
}

fn require(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct SubmitQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub message: Option<String>,
}

impl SubmitQuote {
    fn validate(&self) -> Result<(), Error> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("origin", &self.origin)?;
        require("destination", &self.destination)?;
        if self.weight.is_some_and(|w| w <= Decimal::ZERO) {
            return Err(Error::validation("weight must be a positive number"));
        }
        Ok(())
    }
}

impl Processor<SubmitQuote, Result<QuoteRequest, Error>> for IntakeService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: SubmitQuote) -> Result<QuoteRequest, Error> {
        input.validate()?;
        Ok(self
            .db
            .process(InsertQuoteRequest {
                name: input.name,
                email: input.email,
                phone: input.phone,
                origin: input.origin,
                destination: input.destination,
                weight: input.weight,
                message: blank_to_none(input.message),
            })
            .await?)
    }
}

#[derive(Debug, Clone)]
pub struct SubmitContact {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl SubmitContact {
    fn validate(&self) -> Result<(), Error> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }
}

impl Processor<SubmitContact, Result<ContactMessage, Error>> for IntakeService {
    #[instrument(skip_all, err)]
    async fn process(&self, input: SubmitContact) -> Result<ContactMessage, Error> {
        input.validate()?;
        Ok(self
            .db
            .process(InsertContactMessage {
                name: input.name,
                email: input.email,
                subject: blank_to_none(input.subject),
                message: input.message,
            })
            .await?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListInboxQuotes;

impl Processor<ListInboxQuotes, Result<Vec<QuoteRequest>, Error>> for IntakeService {
    #[instrument(skip_all, err)]
    async fn process(&self, _input: ListInboxQuotes) -> Result<Vec<QuoteRequest>, Error> {
        Ok(self.db.process(ListQuoteRequests).await?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListInboxMessages;

impl Processor<ListInboxMessages, Result<Vec<ContactMessage>, Error>> for IntakeService {
    #[instrument(skip_all, err)]
    async fn process(&self, _input: ListInboxMessages) -> Result<Vec<ContactMessage>, Error> {
        Ok(self.db.process(ListContactMessages).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> SubmitQuote {
        SubmitQuote {
            name: "Kofi Mensah".into(),
            email: "kofi@example.com".into(),
            phone: "+233201234567".into(),
            origin: "Accra".into(),
            destination: "Lagos".into(),
            weight: Some(Decimal::new(12, 0)),
            message: None,
        }
    }

    #[test]
    fn quote_with_all_required_fields_passes() {
        assert!(quote().validate().is_ok());
    }

    #[test]
    fn quote_missing_contact_details_is_rejected() {
        let mut q = quote();
        q.email = "".into();
        assert!(matches!(q.validate(), Err(Error::Validation(_))));

        let mut q = quote();
        q.phone = "   ".into();
        assert!(matches!(q.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn quote_weight_is_optional_but_must_be_positive_when_given() {
        let mut q = quote();
        q.weight = None;
        assert!(q.validate().is_ok());

        q.weight = Some(Decimal::ZERO);
        assert!(matches!(q.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn contact_requires_a_message_body() {
        let c = SubmitContact {
            name: "Ama".into(),
            email: "ama@example.com".into(),
            subject: None,
            message: "".into(),
        };
        assert!(matches!(c.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn blank_optional_fields_collapse_to_none() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some("hello".into())), Some("hello".into()));
        assert_eq!(blank_to_none(None), None);
    }
}
