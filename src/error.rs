/// Errors returned by the rank based accessors and by [`Options`](crate::Options).
///
/// Every check runs before the list is touched, so an `Err` always leaves
/// the skiplist exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipListError {
    #[error("index out of range [{index}] with skip list length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("value for index {index} does not order strictly between its neighbours")]
    OrderingViolation { index: usize },
    #[error("level probability must lie in (0, 1), got {0}")]
    InvalidProbability(f64),
}

pub type Result<T> = std::result::Result<T, SkipListError>;
