pub mod query;
pub mod shipments;
pub mod transition;
