//! Response envelopes for list endpoints
//!
//! Every successful body is a JSON object keyed by what it carries:
//! `{"list": ...}`, `{"lists": [...], "metadata": ...}` or `{"message": ...}`.

use serde::{Deserialize, Serialize};

use crate::models::List;
use crate::repository::Metadata;

/// Single list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub list: List,
}

/// Paginated list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsEnvelope {
    pub lists: Vec<List>,
    pub metadata: Metadata,
}

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
