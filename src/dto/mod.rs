pub mod activity;
pub mod labels;
pub mod products;
pub mod units;
