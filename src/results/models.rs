//! Typing-test submission models

use serde::{Deserialize, Serialize};

/// One completed typing-test submission.
#[derive(Serialize, Deserialize, Debug)]
pub struct TypeTestRequest {
    pub wpm: i64,
    pub accuracy: i64,
}
