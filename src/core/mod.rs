pub mod engine;
pub mod generator;

pub use crate::domain::model::Draw;
pub use crate::domain::ports::{ConfigProvider, HistorySource};
pub use crate::utils::error::Result;
