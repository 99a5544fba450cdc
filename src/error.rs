use thiserror::Error;

/// Failures of [`Uint`](crate::Uint) operations. Arithmetic overflow is not
/// one of them: it wraps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UintError {
    #[error("attempted to divide by zero")]
    DivideByZero,

    #[error("empty hex string")]
    EmptyHex,

    #[error("invalid hex character {character:?} at position {position}")]
    MalformedHex { position: usize, character: char },

    #[error("hex string has {digits} digits, at most {max} fit")]
    HexOverflow { digits: usize, max: usize },

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Inconsistent network parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("genesis nBits {0:#010x} do not decode to a valid target")]
    InvalidGenesisBits(u32),

    #[error("genesis target is above the proof-of-work limit")]
    GenesisTargetAboveLimit,

    #[error("genesis hash does not satisfy its own nBits")]
    GenesisAboveTarget,

    #[error("checkpoint at height {height} does not match the genesis hash")]
    CheckpointMismatch { height: u32 },
}
