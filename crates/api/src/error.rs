#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid set slot: {0} (expected -1 or a non-negative set index)")]
    InvalidSlot(i64),
}
