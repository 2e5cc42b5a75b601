//! Source events consumed from the mention stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event from the external mention source. `id` is the identity key for
/// at-most-once processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub text: String,
    pub author_id: String,
    pub author_handle: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
}
