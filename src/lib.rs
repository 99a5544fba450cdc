//! Fixed-width integers, compact proof-of-work targets and per-network
//! chain parameters.

pub mod chainparams;
pub mod error;
pub mod hash;
pub mod pow;
pub mod uint;

pub use crate::error::{ParamsError, UintError};
pub use crate::hash::Hash256;
pub use crate::uint::{Uint, Uint256};
