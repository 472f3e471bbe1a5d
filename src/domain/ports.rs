use crate::domain::format::LotoKind;
use crate::domain::model::Draw;
use crate::utils::error::Result;

/// Where past draws come from.
pub trait HistorySource {
    fn load(&self) -> Result<Vec<Draw>>;
}

pub trait ConfigProvider {
    fn loto_kind(&self) -> LotoKind;
    /// Draw to check instead of generating one.
    fn exist(&self) -> Option<&str>;
    fn max_attempts(&self) -> usize;
    fn seed(&self) -> Option<u64>;
}
