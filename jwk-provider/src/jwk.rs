//! JSON Web Key model
//!
//! [`Jwk`] is the wire form of a single key (RFC 7517/7518/8037). It converts
//! to and from [`KeyMaterial`], the library key it describes, which is where
//! public-key extraction and PEM conversion happen.

use crate::algorithms::{EcCurve, OkpCurve};
use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest RSA modulus accepted when parsing a JWK
pub const RSA_MAX_MODULUS_BITS: usize = 16384;

/// A JSON Web Key
///
/// Binary members are base64url without padding. Empty optional members are
/// omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

/// Identifying members shared by every key type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMetadata {
    pub kid: Option<String>,
    pub key_use: Option<String>,
    pub alg: Option<String>,
}

impl KeyMetadata {
    /// Builds metadata from declared attributes, treating empty strings as absent
    pub fn new(kid: &str, key_use: &str, alg: Option<&str>) -> Self {
        Self {
            kid: non_empty(kid),
            key_use: non_empty(key_use),
            alg: alg.and_then(non_empty),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// EC private keys on the supported curves
#[derive(Clone)]
pub enum EcSecretKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

/// EC public keys on the supported curves
#[derive(Clone, Debug)]
pub enum EcPublicKey {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl EcSecretKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            EcSecretKey::P256(_) => EcCurve::P256,
            EcSecretKey::P384(_) => EcCurve::P384,
            EcSecretKey::P521(_) => EcCurve::P521,
        }
    }

    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcSecretKey::P256(k) => EcPublicKey::P256(k.public_key()),
            EcSecretKey::P384(k) => EcPublicKey::P384(k.public_key()),
            EcSecretKey::P521(k) => EcPublicKey::P521(k.public_key()),
        }
    }

    fn scalar_bytes(&self) -> Vec<u8> {
        match self {
            EcSecretKey::P256(k) => k.to_bytes().to_vec(),
            EcSecretKey::P384(k) => k.to_bytes().to_vec(),
            EcSecretKey::P521(k) => k.to_bytes().to_vec(),
        }
    }

    fn from_scalar(curve: EcCurve, d: &[u8]) -> Result<Self> {
        let invalid = |e: p256::elliptic_curve::Error| {
            Error::InvalidJwk(format!("invalid {} private key: {}", curve, e))
        };
        Ok(match curve {
            EcCurve::P256 => EcSecretKey::P256(p256::SecretKey::from_slice(d).map_err(invalid)?),
            EcCurve::P384 => EcSecretKey::P384(p384::SecretKey::from_slice(d).map_err(invalid)?),
            EcCurve::P521 => EcSecretKey::P521(p521::SecretKey::from_slice(d).map_err(invalid)?),
        })
    }

    fn to_pem(&self) -> Result<String> {
        use p256::pkcs8::LineEnding;
        let pem = match self {
            EcSecretKey::P256(k) => k.to_sec1_pem(LineEnding::LF),
            EcSecretKey::P384(k) => k.to_sec1_pem(LineEnding::LF),
            EcSecretKey::P521(k) => k.to_sec1_pem(LineEnding::LF),
        }
        .map_err(|e| Error::Pem(format!("Failed to marshal EC private key: {}", e)))?;
        Ok(pem.trim().to_string())
    }
}

impl EcPublicKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            EcPublicKey::P256(_) => EcCurve::P256,
            EcPublicKey::P384(_) => EcCurve::P384,
            EcPublicKey::P521(_) => EcCurve::P521,
        }
    }

    /// Affine coordinates (x, y), each padded to the curve's field length
    fn coordinates(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let (x, y) = match self {
            EcPublicKey::P256(k) => {
                let point = k.to_encoded_point(false);
                (point.x().map(|v| v.to_vec()), point.y().map(|v| v.to_vec()))
            }
            EcPublicKey::P384(k) => {
                let point = k.to_encoded_point(false);
                (point.x().map(|v| v.to_vec()), point.y().map(|v| v.to_vec()))
            }
            EcPublicKey::P521(k) => {
                let point = k.to_encoded_point(false);
                (point.x().map(|v| v.to_vec()), point.y().map(|v| v.to_vec()))
            }
        };
        match (x, y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(Error::InvalidJwk("EC public key is the identity point".to_string())),
        }
    }

    fn from_coordinates(curve: EcCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        let len = curve.field_len();
        if x.len() != len || y.len() != len {
            return Err(Error::InvalidJwk(format!(
                "{} coordinates must be {} bytes each",
                curve, len
            )));
        }

        // SEC1 uncompressed point: 0x04 || x || y
        let mut sec1 = Vec::with_capacity(1 + 2 * len);
        sec1.push(0x04);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);

        let invalid = |e: p256::elliptic_curve::Error| {
            Error::InvalidJwk(format!("invalid {} public key: {}", curve, e))
        };
        Ok(match curve {
            EcCurve::P256 => EcPublicKey::P256(p256::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?),
            EcCurve::P384 => EcPublicKey::P384(p384::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?),
            EcCurve::P521 => EcPublicKey::P521(p521::PublicKey::from_sec1_bytes(&sec1).map_err(invalid)?),
        })
    }

    fn to_pem(&self) -> Result<String> {
        use p256::pkcs8::{EncodePublicKey, LineEnding};
        let pem = match self {
            EcPublicKey::P256(k) => k.to_public_key_pem(LineEnding::LF),
            EcPublicKey::P384(k) => k.to_public_key_pem(LineEnding::LF),
            EcPublicKey::P521(k) => k.to_public_key_pem(LineEnding::LF),
        }
        .map_err(|e| Error::Pem(format!("Failed to marshal EC public key: {}", e)))?;
        Ok(pem.trim().to_string())
    }
}

impl PartialEq for EcPublicKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EcPublicKey::P256(a), EcPublicKey::P256(b)) => a == b,
            (EcPublicKey::P384(a), EcPublicKey::P384(b)) => a == b,
            (EcPublicKey::P521(a), EcPublicKey::P521(b)) => a == b,
            _ => false,
        }
    }
}

/// The library key a JWK describes
pub enum KeyMaterial {
    RsaPrivate(Box<RsaPrivateKey>),
    RsaPublic(RsaPublicKey),
    EcPrivate(EcSecretKey),
    EcPublic(EcPublicKey),
    Ed25519Private(ed25519_dalek::SigningKey),
    Ed25519Public(ed25519_dalek::VerifyingKey),
    X25519Private(x25519_dalek::StaticSecret),
    X25519Public(x25519_dalek::PublicKey),
    Symmetric(Vec<u8>),
}

impl fmt::Debug for KeyMaterial {
    // Never print key material
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({})", self.kind())
    }
}

impl KeyMaterial {
    /// Short human-readable description of the key
    pub fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::RsaPrivate(_) => "RSA private key",
            KeyMaterial::RsaPublic(_) => "RSA public key",
            KeyMaterial::EcPrivate(_) => "EC private key",
            KeyMaterial::EcPublic(_) => "EC public key",
            KeyMaterial::Ed25519Private(_) => "Ed25519 private key",
            KeyMaterial::Ed25519Public(_) => "Ed25519 public key",
            KeyMaterial::X25519Private(_) => "X25519 private key",
            KeyMaterial::X25519Public(_) => "X25519 public key",
            KeyMaterial::Symmetric(_) => "symmetric key",
        }
    }

    pub fn is_private(&self) -> bool {
        !matches!(
            self,
            KeyMaterial::RsaPublic(_)
                | KeyMaterial::EcPublic(_)
                | KeyMaterial::Ed25519Public(_)
                | KeyMaterial::X25519Public(_)
        )
    }

    /// Derives the public half through the crypto library
    pub fn public(&self) -> Result<KeyMaterial> {
        Ok(match self {
            KeyMaterial::RsaPrivate(k) => KeyMaterial::RsaPublic(k.to_public_key()),
            KeyMaterial::RsaPublic(k) => KeyMaterial::RsaPublic(k.clone()),
            KeyMaterial::EcPrivate(k) => KeyMaterial::EcPublic(k.public_key()),
            KeyMaterial::EcPublic(k) => KeyMaterial::EcPublic(k.clone()),
            KeyMaterial::Ed25519Private(k) => KeyMaterial::Ed25519Public(k.verifying_key()),
            KeyMaterial::Ed25519Public(k) => KeyMaterial::Ed25519Public(*k),
            KeyMaterial::X25519Private(k) => {
                KeyMaterial::X25519Public(x25519_dalek::PublicKey::from(k))
            }
            KeyMaterial::X25519Public(k) => KeyMaterial::X25519Public(*k),
            KeyMaterial::Symmetric(_) => {
                return Err(Error::UnsupportedKeyType(
                    "symmetric (oct) keys have no public part".to_string(),
                ))
            }
        })
    }

    /// Size of the key in bits, for key types with a variable size
    pub fn size_bits(&self) -> Option<usize> {
        match self {
            KeyMaterial::RsaPrivate(k) => Some(k.size() * 8),
            KeyMaterial::RsaPublic(k) => Some(k.size() * 8),
            KeyMaterial::Symmetric(k) => Some(k.len() * 8),
            _ => None,
        }
    }

    /// Encodes the key as a PEM block
    ///
    /// RSA keys use PKCS#1, EC private keys SEC1, EC public keys SPKI and
    /// Ed25519 keys PKCS#8/SPKI. The result has no trailing newline.
    pub fn to_pem(&self) -> Result<String> {
        match self {
            KeyMaterial::RsaPrivate(k) => {
                use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
                let pem = k
                    .to_pkcs1_pem(LineEnding::LF)
                    .map_err(|e| Error::Pem(format!("Failed to marshal RSA private key: {}", e)))?;
                Ok(pem.trim().to_string())
            }
            KeyMaterial::RsaPublic(k) => {
                use rsa::pkcs1::{EncodeRsaPublicKey, LineEnding};
                let pem = k
                    .to_pkcs1_pem(LineEnding::LF)
                    .map_err(|e| Error::Pem(format!("Failed to marshal RSA public key: {}", e)))?;
                Ok(pem.trim().to_string())
            }
            KeyMaterial::EcPrivate(k) => k.to_pem(),
            KeyMaterial::EcPublic(k) => k.to_pem(),
            KeyMaterial::Ed25519Private(k) => {
                use ed25519_dalek::pkcs8::EncodePrivateKey;
                use p256::pkcs8::LineEnding;
                let pem = k.to_pkcs8_pem(LineEnding::LF).map_err(|e| {
                    Error::Pem(format!("Failed to marshal Ed25519 private key: {}", e))
                })?;
                Ok(pem.trim().to_string())
            }
            KeyMaterial::Ed25519Public(k) => {
                use ed25519_dalek::pkcs8::EncodePublicKey;
                use p256::pkcs8::LineEnding;
                let pem = k.to_public_key_pem(LineEnding::LF).map_err(|e| {
                    Error::Pem(format!("Failed to marshal Ed25519 public key: {}", e))
                })?;
                Ok(pem.trim().to_string())
            }
            other => Err(Error::UnsupportedKeyType(format!(
                "PEM conversion is not supported for {}",
                other.kind()
            ))),
        }
    }
}

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn b64_uint(value: &BigUint) -> String {
    b64(&value.to_bytes_be())
}

fn decode(member: &Option<String>, name: &str) -> Result<Vec<u8>> {
    let value = member
        .as_deref()
        .ok_or_else(|| Error::InvalidJwk(format!("missing '{}' member", name)))?;
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| Error::InvalidJwk(format!("could not decode '{}': {}", name, e)))
}

fn decode_uint(member: &Option<String>, name: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&decode(member, name)?))
}

impl Jwk {
    /// Parses a single JWK document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidJwk(format!("failed to parse JWK: {}", e)))
    }

    /// Serializes the key as compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Identifying members of this key
    pub fn metadata(&self) -> KeyMetadata {
        KeyMetadata {
            kid: self.kid.clone(),
            key_use: self.key_use.clone(),
            alg: self.alg.clone(),
        }
    }

    /// Replaces the identifying members, keeping key material untouched
    pub fn with_metadata(mut self, metadata: KeyMetadata) -> Self {
        self.kid = metadata.kid;
        self.key_use = metadata.key_use;
        self.alg = metadata.alg;
        self
    }

    /// Wraps a library key into a JWK with the given metadata
    pub fn from_material(material: &KeyMaterial, metadata: KeyMetadata) -> Result<Self> {
        let mut jwk = Jwk::default().with_metadata(metadata);
        match material {
            KeyMaterial::RsaPrivate(k) => {
                jwk.kty = "RSA".to_string();
                jwk.n = Some(b64_uint(k.n()));
                jwk.e = Some(b64_uint(k.e()));
                jwk.d = Some(b64_uint(k.d()));
                let primes = k.primes();
                if primes.len() != 2 {
                    return Err(Error::InvalidJwk(
                        "multi-prime RSA keys are not supported".to_string(),
                    ));
                }
                jwk.p = Some(b64_uint(&primes[0]));
                jwk.q = Some(b64_uint(&primes[1]));
                jwk.dp = k.dp().map(b64_uint);
                jwk.dq = k.dq().map(b64_uint);
                jwk.qi = k.crt_coefficient().as_ref().map(b64_uint);
            }
            KeyMaterial::RsaPublic(k) => {
                jwk.kty = "RSA".to_string();
                jwk.n = Some(b64_uint(k.n()));
                jwk.e = Some(b64_uint(k.e()));
            }
            KeyMaterial::EcPrivate(k) => {
                let (x, y) = k.public_key().coordinates()?;
                jwk.kty = "EC".to_string();
                jwk.crv = Some(k.curve().as_str().to_string());
                jwk.x = Some(b64(&x));
                jwk.y = Some(b64(&y));
                jwk.d = Some(b64(&k.scalar_bytes()));
            }
            KeyMaterial::EcPublic(k) => {
                let (x, y) = k.coordinates()?;
                jwk.kty = "EC".to_string();
                jwk.crv = Some(k.curve().as_str().to_string());
                jwk.x = Some(b64(&x));
                jwk.y = Some(b64(&y));
            }
            KeyMaterial::Ed25519Private(k) => {
                jwk.kty = "OKP".to_string();
                jwk.crv = Some(OkpCurve::Ed25519.as_str().to_string());
                jwk.x = Some(b64(k.verifying_key().as_bytes()));
                jwk.d = Some(b64(&k.to_bytes()));
            }
            KeyMaterial::Ed25519Public(k) => {
                jwk.kty = "OKP".to_string();
                jwk.crv = Some(OkpCurve::Ed25519.as_str().to_string());
                jwk.x = Some(b64(k.as_bytes()));
            }
            KeyMaterial::X25519Private(k) => {
                jwk.kty = "OKP".to_string();
                jwk.crv = Some(OkpCurve::X25519.as_str().to_string());
                jwk.x = Some(b64(x25519_dalek::PublicKey::from(k).as_bytes()));
                jwk.d = Some(b64(&k.to_bytes()));
            }
            KeyMaterial::X25519Public(k) => {
                jwk.kty = "OKP".to_string();
                jwk.crv = Some(OkpCurve::X25519.as_str().to_string());
                jwk.x = Some(b64(k.as_bytes()));
            }
            KeyMaterial::Symmetric(k) => {
                jwk.kty = "oct".to_string();
                jwk.k = Some(b64(k));
            }
        }
        Ok(jwk)
    }

    /// Reconstructs the library key this JWK describes
    ///
    /// Private keys are checked against their public members.
    pub fn parse_key(&self) -> Result<KeyMaterial> {
        match self.kty.as_str() {
            "RSA" => self.rsa_material(),
            "EC" => self.ec_material(),
            "OKP" => self.okp_material(),
            "oct" => Ok(KeyMaterial::Symmetric(decode(&self.k, "k")?)),
            other => Err(Error::UnsupportedKeyType(format!("unknown kty '{}'", other))),
        }
    }

    fn rsa_material(&self) -> Result<KeyMaterial> {
        let n = decode_uint(&self.n, "n")?;
        let e = decode_uint(&self.e, "e")?;
        let public = RsaPublicKey::new_with_max_size(n, e, RSA_MAX_MODULUS_BITS)
            .map_err(|err| Error::InvalidJwk(format!("invalid RSA public key: {}", err)))?;
        if self.d.is_none() {
            return Ok(KeyMaterial::RsaPublic(public));
        }

        let d = decode_uint(&self.d, "d")?;
        let p = decode_uint(&self.p, "p")?;
        let q = decode_uint(&self.q, "q")?;
        check_rsa_components(public.n(), public.e(), &d, &p, &q)?;

        let mut private =
            RsaPrivateKey::from_components(public.n().clone(), public.e().clone(), d, vec![p, q])
                .map_err(|err| Error::InvalidJwk(format!("invalid RSA private key: {}", err)))?;
        private
            .precompute()
            .map_err(|err| Error::InvalidJwk(format!("invalid RSA private key: {}", err)))?;
        Ok(KeyMaterial::RsaPrivate(Box::new(private)))
    }

    fn ec_material(&self) -> Result<KeyMaterial> {
        let crv = self
            .crv
            .as_deref()
            .ok_or_else(|| Error::InvalidJwk("missing 'crv' member".to_string()))?;
        let curve: EcCurve = crv.parse().map_err(Error::UnsupportedCurve)?;
        let public = EcPublicKey::from_coordinates(curve, &decode(&self.x, "x")?, &decode(&self.y, "y")?)?;

        if self.d.is_none() {
            return Ok(KeyMaterial::EcPublic(public));
        }

        let d = decode(&self.d, "d")?;
        if d.len() != curve.field_len() {
            return Err(Error::InvalidJwk(format!(
                "{} private key must be {} bytes",
                curve,
                curve.field_len()
            )));
        }
        let secret = EcSecretKey::from_scalar(curve, &d)?;
        if secret.public_key() != public {
            return Err(Error::InvalidJwk(
                "EC public key does not match private key".to_string(),
            ));
        }
        Ok(KeyMaterial::EcPrivate(secret))
    }

    fn okp_material(&self) -> Result<KeyMaterial> {
        let crv = self
            .crv
            .as_deref()
            .ok_or_else(|| Error::InvalidJwk("missing 'crv' member".to_string()))?;
        let curve: OkpCurve = crv.parse().map_err(Error::UnsupportedKeyType)?;
        let x = fixed_32(&decode(&self.x, "x")?, "x")?;

        match curve {
            OkpCurve::Ed25519 => {
                let public = ed25519_dalek::VerifyingKey::from_bytes(&x)
                    .map_err(|e| Error::InvalidJwk(format!("invalid Ed25519 public key: {}", e)))?;
                if self.d.is_none() {
                    return Ok(KeyMaterial::Ed25519Public(public));
                }
                let d = fixed_32(&decode(&self.d, "d")?, "d")?;
                let signing = ed25519_dalek::SigningKey::from_bytes(&d);
                if signing.verifying_key() != public {
                    return Err(Error::InvalidJwk(
                        "Ed25519 public key does not match private key".to_string(),
                    ));
                }
                Ok(KeyMaterial::Ed25519Private(signing))
            }
            OkpCurve::X25519 => {
                let public = x25519_dalek::PublicKey::from(x);
                if self.d.is_none() {
                    return Ok(KeyMaterial::X25519Public(public));
                }
                let d = fixed_32(&decode(&self.d, "d")?, "d")?;
                let secret = x25519_dalek::StaticSecret::from(d);
                if x25519_dalek::PublicKey::from(&secret) != public {
                    return Err(Error::InvalidJwk(
                        "X25519 public key does not match private key".to_string(),
                    ));
                }
                Ok(KeyMaterial::X25519Private(secret))
            }
            other => Err(Error::UnsupportedKeyType(format!(
                "OKP curve {} is not supported",
                other
            ))),
        }
    }

    /// Returns the public JWK, derived from the private key when there is one
    ///
    /// `kid`, `use` and `alg` are carried over. Symmetric keys have no public
    /// half and produce an error.
    pub fn public(&self) -> Result<Jwk> {
        let public = self.parse_key()?.public()?;
        Jwk::from_material(&public, self.metadata())
    }

    /// Encodes the key this JWK describes as PEM
    pub fn to_pem(&self) -> Result<String> {
        self.parse_key()?.to_pem()
    }

    pub fn is_private(&self) -> bool {
        self.d.is_some() || self.k.is_some()
    }
}

/// Checks that the primes multiply to the modulus and that `d` inverts `e`
///
/// `RsaPrivateKey::validate` does the same but caps the modulus at 4096 bits.
fn check_rsa_components(n: &BigUint, e: &BigUint, d: &BigUint, p: &BigUint, q: &BigUint) -> Result<()> {
    let one = BigUint::from(1u32);
    if p <= &one || q <= &one || &(p * q) != n {
        return Err(Error::InvalidJwk(
            "invalid RSA private key: primes do not match modulus".to_string(),
        ));
    }
    let de = d * e;
    if &de % &(p - &one) != one || &de % &(q - &one) != one {
        return Err(Error::InvalidJwk(
            "invalid RSA private key: private exponent does not match public exponent".to_string(),
        ));
    }
    Ok(())
}

fn fixed_32(bytes: &[u8], name: &str) -> Result<[u8; 32]> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidJwk(format!("'{}' must be 32 bytes, got {}", name, bytes.len())))
}
