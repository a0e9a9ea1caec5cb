use rmp_serde::{decode, encode};
use thiserror::Error;

use crate::{DiplomacyNotice, DiplomacyRequest, TreatySnapshot};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("encode error: {0}")]
    Encode(#[from] encode::Error),
    #[error("decode error: {0}")]
    Decode(#[from] decode::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize_request(req: &DiplomacyRequest) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(req)?)
}

pub fn deserialize_request(bytes: &[u8]) -> Result<DiplomacyRequest, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_notice(notice: &DiplomacyNotice) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(notice)?)
}

pub fn deserialize_notice(bytes: &[u8]) -> Result<DiplomacyNotice, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_snapshot(snapshot: &TreatySnapshot) -> Result<Vec<u8>, WireError> {
    Ok(encode::to_vec(snapshot)?)
}

pub fn deserialize_snapshot(bytes: &[u8]) -> Result<TreatySnapshot, WireError> {
    Ok(decode::from_slice(bytes)?)
}

pub fn serialize_request_json(req: &DiplomacyRequest) -> Result<String, WireError> {
    Ok(serde_json::to_string(req)?)
}

pub fn deserialize_request_json(json: &str) -> Result<DiplomacyRequest, WireError> {
    Ok(serde_json::from_str(json)?)
}

pub fn serialize_notice_json(notice: &DiplomacyNotice) -> Result<String, WireError> {
    Ok(serde_json::to_string(notice)?)
}

pub fn deserialize_notice_json(json: &str) -> Result<DiplomacyNotice, WireError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClauseKind, PlayerId};

    #[test]
    fn request_roundtrip_msgpack_and_json() {
        let req = DiplomacyRequest::ProposeClause {
            plr0: PlayerId(0),
            plr1: PlayerId(1),
            giver: PlayerId(0),
            kind: ClauseKind::Gold,
            value: 50,
        };

        let bytes = serialize_request(&req).unwrap();
        assert_eq!(deserialize_request(&bytes).unwrap(), req);

        let json = serialize_request_json(&req).unwrap();
        assert_eq!(deserialize_request_json(&json).unwrap(), req);
    }
}
