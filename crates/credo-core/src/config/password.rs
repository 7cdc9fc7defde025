//! Password hashing target parameters.

use serde::{Deserialize, Serialize};

/// Argon2id target parameters used for every newly computed hash.
///
/// Stored hashes computed with different values still verify; they are
/// flagged for rehashing so upgrades roll out on the next successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_cost")]
    pub memory_cost_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// Degree of parallelism (lanes).
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Random salt length in bytes.
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
    /// Derived key length in bytes.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: default_memory_cost(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
            salt_length: default_salt_length(),
            key_length: default_key_length(),
        }
    }
}

fn default_memory_cost() -> u32 {
    12288
}

fn default_time_cost() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    1
}

fn default_salt_length() -> usize {
    16
}

fn default_key_length() -> usize {
    32
}
