//! Self-describing Argon2id hash strings.
//!
//! Layout: `$argon2id$v=19$m=<memory>,t=<time>,p=<parallelism>$<salt>$<digest>`
//! where salt and digest use the standard base64 alphabet without padding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use credo_core::config::PasswordConfig;

/// Algorithm identifier written into every hash.
pub const ALGORITHM_ID: &str = "argon2id";

/// Argon2 version 0x13.
pub const ALGORITHM_VERSION: u32 = 19;

const SEGMENT_COUNT: usize = 6;

/// Cost and size parameters of an Argon2id hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Number of passes.
    pub time_cost: u32,
    /// Number of lanes.
    pub parallelism: u32,
    /// Salt length in bytes.
    pub salt_length: usize,
    /// Digest length in bytes.
    pub key_length: usize,
}

impl From<&PasswordConfig> for HashParams {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            memory_cost: config.memory_cost_kib,
            time_cost: config.time_cost,
            parallelism: config.parallelism,
            salt_length: config.salt_length,
            key_length: config.key_length,
        }
    }
}

/// A parsed hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHash {
    /// Stored digest bytes.
    pub digest: Vec<u8>,
    /// Salt bytes.
    pub salt: Vec<u8>,
    /// Parameters; the lengths are those of the decoded salt and digest.
    pub params: HashParams,
}

/// Reasons a stored hash string cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HashDecodeError {
    /// Wrong number of `$` segments or a non-empty leading segment.
    #[error("hash does not have the expected segment layout")]
    InvalidFormat,
    /// Algorithm other than argon2id or version other than 19.
    #[error("hash uses an incompatible algorithm or version")]
    IncompatibleVersion,
    /// Cost segment is not `m=<n>,t=<n>,p=<n>` with positive values.
    #[error("hash parameters are malformed")]
    MalformedParameters,
    /// Salt or digest is empty or not valid unpadded base64.
    #[error("hash salt or digest is not valid base64")]
    MalformedEncoding,
}

/// Render a digest, salt and parameters as a hash string.
pub fn encode(digest: &[u8], salt: &[u8], params: &HashParams) -> String {
    format!(
        "${ALGORITHM_ID}$v={ALGORITHM_VERSION}$m={},t={},p={}${}${}",
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(digest),
    )
}

/// Parse a hash string produced by [`encode`].
pub fn decode(encoded: &str) -> Result<DecodedHash, HashDecodeError> {
    let segments: Vec<&str> = encoded.split('$').collect();
    if segments.len() != SEGMENT_COUNT || !segments[0].is_empty() {
        return Err(HashDecodeError::InvalidFormat);
    }

    if segments[1] != ALGORITHM_ID || segments[2] != format!("v={ALGORITHM_VERSION}") {
        return Err(HashDecodeError::IncompatibleVersion);
    }

    let (memory_cost, time_cost, parallelism) = parse_costs(segments[3])?;
    let salt = decode_segment(segments[4])?;
    let digest = decode_segment(segments[5])?;

    Ok(DecodedHash {
        params: HashParams {
            memory_cost,
            time_cost,
            parallelism,
            salt_length: salt.len(),
            key_length: digest.len(),
        },
        digest,
        salt,
    })
}

fn parse_costs(segment: &str) -> Result<(u32, u32, u32), HashDecodeError> {
    let mut fields = segment.split(',');
    let mut next = |key: &str| {
        fields
            .next()
            .and_then(|field| field.strip_prefix(key))
            .and_then(parse_positive)
            .ok_or(HashDecodeError::MalformedParameters)
    };

    let costs = (next("m=")?, next("t=")?, next("p=")?);
    if fields.next().is_some() {
        return Err(HashDecodeError::MalformedParameters);
    }
    Ok(costs)
}

fn parse_positive(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, HashDecodeError> {
    if segment.is_empty() {
        return Err(HashDecodeError::MalformedEncoding);
    }
    STANDARD_NO_PAD
        .decode(segment)
        .map_err(|_| HashDecodeError::MalformedEncoding)
}
