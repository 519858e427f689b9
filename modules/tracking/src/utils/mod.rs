pub mod tracking_number;
