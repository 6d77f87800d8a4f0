pub mod constant_product;
pub mod exchange_rate;
pub mod withdrawal;
