//! 计费引擎 - 购物车定价与账单维护

pub mod engine;

pub use engine::{create_bill, update_bill};
