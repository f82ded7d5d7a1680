//! Server public parameters for zero-knowledge groups.
//!
//! Only parsing is implemented here. The parameters are handed to the
//! messaging library untouched; a successful parse is what allows the client
//! to advertise group v2 support.

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use thiserror::Error;

const POINT_LEN: usize = 32;
/// reserved byte, two credential public keys of two points each, one signature key
pub const SERVER_PUBLIC_PARAMS_LEN: usize = 1 + 5 * POINT_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZkGroupError {
    #[error("server public params must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("unsupported reserved byte {0:#04x} in server public params")]
    ReservedByte(u8),
    #[error("point {index} of server public params is not a valid ristretto encoding")]
    InvalidPoint { index: usize },
}

/// Public key of one of the server's anonymous credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPublicKey {
    pub c_w: RistrettoPoint,
    pub i: RistrettoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerPublicParams {
    auth_credentials: CredentialPublicKey,
    profile_key_credentials: CredentialPublicKey,
    signature_key: RistrettoPoint,
}

impl ServerPublicParams {
    /// Parse the serialized parameters.
    /// Every point has to decompress; callers that only need to know whether the
    /// parameters are usable should treat any error the same way.
    pub fn try_parse(bytes: &[u8]) -> Result<Self, ZkGroupError> {
        if bytes.len() != SERVER_PUBLIC_PARAMS_LEN {
            return Err(ZkGroupError::InvalidLength {
                expected: SERVER_PUBLIC_PARAMS_LEN,
                actual: bytes.len(),
            });
        }
        let (reserved, points) = bytes.split_at(1);
        if reserved[0] != 0 {
            return Err(ZkGroupError::ReservedByte(reserved[0]));
        }

        let mut decoded = [RistrettoPoint::default(); 5];
        for (index, (chunk, point)) in points
            .chunks_exact(POINT_LEN)
            .zip(decoded.iter_mut())
            .enumerate()
        {
            *point = decompress(chunk).ok_or(ZkGroupError::InvalidPoint { index })?;
        }
        let [auth_c_w, auth_i, profile_c_w, profile_i, signature_key] = decoded;

        tracing::trace!("parsed zkgroup server public params");
        Ok(Self {
            auth_credentials: CredentialPublicKey {
                c_w: auth_c_w,
                i: auth_i,
            },
            profile_key_credentials: CredentialPublicKey {
                c_w: profile_c_w,
                i: profile_i,
            },
            signature_key,
        })
    }

    pub fn auth_credentials(&self) -> &CredentialPublicKey {
        &self.auth_credentials
    }

    pub fn profile_key_credentials(&self) -> &CredentialPublicKey {
        &self.profile_key_credentials
    }

    pub fn signature_key(&self) -> &RistrettoPoint {
        &self.signature_key
    }
}

fn decompress(chunk: &[u8]) -> Option<RistrettoPoint> {
    let bytes: [u8; POINT_LEN] = chunk.try_into().ok()?;
    CompressedRistretto(bytes).decompress()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use rstest::rstest;
    use signal_configuration::SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS;

    fn production_params() -> Vec<u8> {
        STANDARD
            .decode(SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS)
            .unwrap()
    }

    #[test]
    fn parses_production_params() {
        let bytes = production_params();
        assert_eq!(bytes.len(), SERVER_PUBLIC_PARAMS_LEN);
        let params = ServerPublicParams::try_parse(&bytes).unwrap();
        assert_eq!(
            params.signature_key().compress().as_bytes(),
            &bytes[1 + 4 * POINT_LEN..]
        );
    }

    #[rstest]
    #[case(vec![], ZkGroupError::InvalidLength { expected: 161, actual: 0 })]
    #[case(vec![1, 2, 3], ZkGroupError::InvalidLength { expected: 161, actual: 3 })]
    #[case(vec![0; 162], ZkGroupError::InvalidLength { expected: 161, actual: 162 })]
    fn rejects_wrong_length(#[case] bytes: Vec<u8>, #[case] expected: ZkGroupError) {
        assert_eq!(ServerPublicParams::try_parse(&bytes), Err(expected));
    }

    #[test]
    fn rejects_reserved_byte() {
        let mut bytes = production_params();
        bytes[0] = 1;
        assert_eq!(
            ServerPublicParams::try_parse(&bytes),
            Err(ZkGroupError::ReservedByte(1))
        );
    }

    #[test]
    fn rejects_non_canonical_points() {
        let mut bytes = vec![0xff; SERVER_PUBLIC_PARAMS_LEN];
        bytes[0] = 0;
        assert_eq!(
            ServerPublicParams::try_parse(&bytes),
            Err(ZkGroupError::InvalidPoint { index: 0 })
        );
    }

    #[test]
    fn reports_first_bad_point() {
        let mut bytes = production_params();
        let third = 1 + 2 * POINT_LEN;
        bytes[third..third + POINT_LEN].fill(0xff);
        assert_eq!(
            ServerPublicParams::try_parse(&bytes),
            Err(ZkGroupError::InvalidPoint { index: 2 })
        );
    }
}
