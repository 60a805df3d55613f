//! API handlers module

pub mod companies;
pub mod health;
pub mod meta;
pub mod products;
pub mod seed;
