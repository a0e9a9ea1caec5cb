//! Chancery protocol types.
//!
//! Wire-facing data model for the negotiation core: identity types, hex
//! tiles, treaty/clause structures, the inbound/outbound diplomacy message
//! enums, and MessagePack/JSON codec helpers.

mod diplomacy;
mod hex;
mod ids;
mod message;
mod wire;

pub use crate::diplomacy::*;
pub use crate::hex::Hex;
pub use crate::ids::*;
pub use crate::message::*;
pub use crate::wire::*;
