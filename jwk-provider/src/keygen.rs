//! Key generation
//!
//! Every generator draws from the operating system RNG and returns the
//! library key; [`Jwk::from_material`](crate::jwk::Jwk::from_material) wraps
//! it for serialization.

use crate::algorithms::{EcCurve, OkpCurve};
use crate::error::{Error, Result};
use crate::jwk::{EcSecretKey, KeyMaterial};
use rand::{rngs::OsRng, RngCore};
use rsa::RsaPrivateKey;
use tracing::debug;

/// Generates an RSA private key with a modulus of `bits` bits
pub fn rsa(bits: usize) -> Result<KeyMaterial> {
    debug!("Generating {}-bit RSA key", bits);
    let mut rng = OsRng;
    let key = RsaPrivateKey::new(&mut rng, bits)?;
    Ok(KeyMaterial::RsaPrivate(Box::new(key)))
}

/// Generates an EC private key on the named curve
pub fn ec(curve: EcCurve) -> Result<KeyMaterial> {
    debug!("Generating EC key on {}", curve);
    let mut rng = OsRng;
    let secret = match curve {
        EcCurve::P256 => EcSecretKey::P256(p256::SecretKey::random(&mut rng)),
        EcCurve::P384 => EcSecretKey::P384(p384::SecretKey::random(&mut rng)),
        EcCurve::P521 => EcSecretKey::P521(p521::SecretKey::random(&mut rng)),
    };
    Ok(KeyMaterial::EcPrivate(secret))
}

/// Generates `bits / 8` random bytes of symmetric key material
pub fn oct(bits: usize) -> Result<KeyMaterial> {
    if bits == 0 || bits % 8 != 0 {
        return Err(Error::KeyGeneration(format!(
            "symmetric key size must be a positive multiple of 8, got {}",
            bits
        )));
    }
    debug!("Generating {}-bit symmetric key", bits);
    let mut key = vec![0u8; bits / 8];
    OsRng.fill_bytes(&mut key);
    Ok(KeyMaterial::Symmetric(key))
}

/// Generates an octet key pair for the given curve
pub fn okp(curve: OkpCurve) -> Result<KeyMaterial> {
    debug!("Generating {} key pair", curve);
    let mut rng = OsRng;
    match curve {
        OkpCurve::Ed25519 => Ok(KeyMaterial::Ed25519Private(
            ed25519_dalek::SigningKey::generate(&mut rng),
        )),
        OkpCurve::X25519 => Ok(KeyMaterial::X25519Private(
            x25519_dalek::StaticSecret::random_from_rng(rng),
        )),
        OkpCurve::Ed448 | OkpCurve::X448 => Err(Error::UnsupportedAlgorithm(format!(
            "{} key generation is not available",
            curve
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwk::{Jwk, KeyMetadata};
    use assert_matches::assert_matches;

    #[test]
    fn ec_keys_use_the_requested_curve() {
        for curve in EcCurve::ALL {
            let key = ec(curve).unwrap();
            let jwk = Jwk::from_material(&key, KeyMetadata::default()).unwrap();
            assert_eq!(jwk.crv.as_deref(), Some(curve.as_str()));
            assert!(jwk.parse_key().unwrap().is_private());
        }
    }

    #[test]
    fn oct_key_length_follows_size() {
        assert_eq!(oct(256).unwrap().size_bits(), Some(256));
        assert_matches!(oct(100), Err(Error::KeyGeneration(_)));
        assert_matches!(oct(0), Err(Error::KeyGeneration(_)));
    }

    #[test]
    fn okp_448_curves_are_unsupported() {
        assert_matches!(okp(OkpCurve::Ed448), Err(Error::UnsupportedAlgorithm(_)));
        assert_matches!(okp(OkpCurve::X448), Err(Error::UnsupportedAlgorithm(_)));
        assert_matches!(okp(OkpCurve::X25519), Ok(KeyMaterial::X25519Private(_)));
    }
}
