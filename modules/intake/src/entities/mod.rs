pub mod contact_message;
pub mod quote_request;
