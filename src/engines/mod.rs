pub mod analytics;
pub mod customers;
pub mod engagement;
pub mod insights;
pub mod overview;
pub mod revenue;
