use crate::errors::AppError;
use crate::models::Booking;

pub const DEFAULT_PREFIX: &str = "BK-";
const SEQUENCE_WIDTH: usize = 6;

pub trait IdGenerator: Send + Sync {
    /// Proposes an id for a new booking given the current collection. The
    /// store still rejects the proposal if it collides.
    fn next_id(&self, existing: &[Booking]) -> Result<String, AppError>;
}

/// `BK-000001`, `BK-000002`, ... Max-plus-one over the ids already stored,
/// so it is only collision-free with a single writer.
pub struct SequentialIdGenerator {
    prefix: String,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn sequence_of(&self, id: &str) -> Option<u64> {
        let suffix = id.strip_prefix(&self.prefix)?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, existing: &[Booking]) -> Result<String, AppError> {
        let max = existing
            .iter()
            .filter_map(|b| self.sequence_of(&b.id))
            .max()
            .unwrap_or(0);
        let next = max
            .checked_add(1)
            .ok_or_else(|| AppError::IdsExhausted(self.prefix.clone()))?;
        let id = format!("{}{:0width$}", self.prefix, next, width = SEQUENCE_WIDTH);
        tracing::debug!(%id, "generated sequential booking id");
        Ok(id)
    }
}

/// Prefix plus 32 uppercase hex digits from a v4 UUID.
pub struct RandomIdGenerator {
    prefix: String,
}

impl RandomIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, _existing: &[Booking]) -> Result<String, AppError> {
        let id = format!(
            "{}{}",
            self.prefix,
            uuid::Uuid::new_v4().simple().to_string().to_uppercase()
        );
        tracing::debug!(%id, "generated random booking id");
        Ok(id)
    }
}
