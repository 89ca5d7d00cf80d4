//! Algorithm, key size and curve tables
//!
//! These tables decide which `use`/`alg`/`size`/`crv` combinations a key
//! resource accepts. Minimum sizes are in bits.

use std::fmt;
use std::str::FromStr;

/// Declared purpose of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUse {
    /// Signing
    Sig,
    /// Encryption
    Enc,
}

impl KeyUse {
    /// Returns the `use` value as written in a JWK
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUse::Sig => "sig",
            KeyUse::Enc => "enc",
        }
    }
}

impl FromStr for KeyUse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sig" => Ok(KeyUse::Sig),
            "enc" => Ok(KeyUse::Enc),
            other => Err(format!("Expected 'sig' or 'enc', got '{}'", other)),
        }
    }
}

impl fmt::Display for KeyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RSA signature algorithms and their recommended minimum modulus
pub const RSA_SIGNATURE_ALGORITHMS: &[(&str, u32)] = &[
    ("RS256", 2048),
    ("RS384", 3072),
    ("RS512", 4096),
    ("PS256", 2048),
    ("PS384", 3072),
    ("PS512", 4096),
];

/// RSA encryption algorithms and their recommended minimum modulus
pub const RSA_ENCRYPTION_ALGORITHMS: &[(&str, u32)] = &[
    ("RSA1_5", 2048),
    ("RSA-OAEP", 2048),
    ("RSA-OAEP-256", 2048),
];

/// Smallest RSA modulus the provider generates
pub const RSA_MIN_KEY_SIZE: u32 = 2048;

/// Standard RSA moduli
pub const RSA_KEY_SIZES: &[u32] = &[2048, 3072, 4096];

/// HMAC signature algorithms for symmetric keys and their minimum sizes
pub const OCT_SIGNATURE_ALGORITHMS: &[(&str, u32)] = &[
    ("HS256", 256),
    ("HS384", 384),
    ("HS512", 512),
    ("none", 0),
];

/// Key wrapping algorithms for symmetric keys and their minimum sizes
pub const OCT_ENCRYPTION_ALGORITHMS: &[(&str, u32)] = &[
    ("A128KW", 128),
    ("A192KW", 192),
    ("A256KW", 256),
    ("dir", 0),
    ("A128GCMKW", 128),
    ("A192GCMKW", 192),
    ("A256GCMKW", 256),
    ("PBES2-HS256+A128KW", 256),
    ("PBES2-HS384+A192KW", 384),
    ("PBES2-HS512+A256KW", 512),
];

/// General recommendation for symmetric key sizes
pub const OCT_RECOMMENDED_KEY_SIZE: u32 = 256;

/// Symmetric algorithms exempt from the size recommendation
pub const OCT_UNKEYED_ALGORITHMS: &[&str] = &["none", "dir"];

/// EC signature algorithms and the curve each one mandates
pub const EC_SIGNATURE_ALGORITHMS: &[(&str, EcCurve)] = &[
    ("ES256", EcCurve::P256),
    ("ES384", EcCurve::P384),
    ("ES512", EcCurve::P521),
];

/// ECDH-ES key agreement variants usable with any supported curve
pub const EC_ENCRYPTION_ALGORITHMS: &[&str] = &[
    "ECDH-ES",
    "ECDH-ES+A128KW",
    "ECDH-ES+A192KW",
    "ECDH-ES+A256KW",
];

/// OKP signature algorithms
pub const OKP_SIGNATURE_ALGORITHMS: &[&str] = &["Ed25519", "Ed448"];

/// OKP key agreement algorithms
pub const OKP_ENCRYPTION_ALGORITHMS: &[&str] = &["X25519", "X448"];

/// Looks up the minimum size of an algorithm in a size table
pub fn min_size(table: &[(&str, u32)], alg: &str) -> Option<u32> {
    table.iter().find(|(name, _)| *name == alg).map(|(_, bits)| *bits)
}

/// Names of the algorithms in a size table, in declaration order
pub fn names(table: &[(&'static str, u32)]) -> Vec<&'static str> {
    table.iter().map(|(name, _)| *name).collect()
}

/// Renders algorithm names for diagnostics and documentation
pub fn join(names: &[&str]) -> String {
    names.join(", ")
}

/// RSA algorithm table for the given use
pub fn rsa_algorithms(key_use: KeyUse) -> &'static [(&'static str, u32)] {
    match key_use {
        KeyUse::Sig => RSA_SIGNATURE_ALGORITHMS,
        KeyUse::Enc => RSA_ENCRYPTION_ALGORITHMS,
    }
}

/// Symmetric algorithm table for the given use
pub fn oct_algorithms(key_use: KeyUse) -> &'static [(&'static str, u32)] {
    match key_use {
        KeyUse::Sig => OCT_SIGNATURE_ALGORITHMS,
        KeyUse::Enc => OCT_ENCRYPTION_ALGORITHMS,
    }
}

/// OKP algorithm list for the given use
pub fn okp_algorithms(key_use: KeyUse) -> &'static [&'static str] {
    match key_use {
        KeyUse::Sig => OKP_SIGNATURE_ALGORITHMS,
        KeyUse::Enc => OKP_ENCRYPTION_ALGORITHMS,
    }
}

/// The curve an EC signature algorithm requires
pub fn curve_for_ec_signature(alg: &str) -> Option<EcCurve> {
    EC_SIGNATURE_ALGORITHMS
        .iter()
        .find(|(name, _)| *name == alg)
        .map(|(_, curve)| *curve)
}

/// NIST curves supported for EC keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    pub const ALL: [EcCurve; 3] = [EcCurve::P256, EcCurve::P384, EcCurve::P521];

    /// Returns the `crv` value as written in a JWK
    pub fn as_str(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Length in bytes of a coordinate or private scalar
    pub fn field_len(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl FromStr for EcCurve {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unsupported elliptic curve: {}", s))
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Octet key pair curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OkpCurve {
    Ed25519,
    Ed448,
    X25519,
    X448,
}

impl OkpCurve {
    pub fn as_str(&self) -> &'static str {
        match self {
            OkpCurve::Ed25519 => "Ed25519",
            OkpCurve::Ed448 => "Ed448",
            OkpCurve::X25519 => "X25519",
            OkpCurve::X448 => "X448",
        }
    }

    /// The use class this curve belongs to
    pub fn key_use(&self) -> KeyUse {
        match self {
            OkpCurve::Ed25519 | OkpCurve::Ed448 => KeyUse::Sig,
            OkpCurve::X25519 | OkpCurve::X448 => KeyUse::Enc,
        }
    }
}

impl FromStr for OkpCurve {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ed25519" => Ok(OkpCurve::Ed25519),
            "Ed448" => Ok(OkpCurve::Ed448),
            "X25519" => Ok(OkpCurve::X25519),
            "X448" => Ok(OkpCurve::X448),
            other => Err(format!("unsupported OKP curve: {}", other)),
        }
    }
}

impl fmt::Display for OkpCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_and_encryption_tables_are_disjoint() {
        for (alg, _) in RSA_SIGNATURE_ALGORITHMS {
            assert!(min_size(RSA_ENCRYPTION_ALGORITHMS, alg).is_none());
        }
        for (alg, _) in OCT_SIGNATURE_ALGORITHMS {
            assert!(min_size(OCT_ENCRYPTION_ALGORITHMS, alg).is_none());
        }
        for alg in OKP_SIGNATURE_ALGORITHMS {
            assert!(!OKP_ENCRYPTION_ALGORITHMS.contains(alg));
        }
    }

    #[test]
    fn ec_signature_algorithms_mandate_curves() {
        assert_eq!(curve_for_ec_signature("ES256"), Some(EcCurve::P256));
        assert_eq!(curve_for_ec_signature("ES384"), Some(EcCurve::P384));
        assert_eq!(curve_for_ec_signature("ES512"), Some(EcCurve::P521));
        assert_eq!(curve_for_ec_signature("ECDH-ES"), None);
    }

    #[test]
    fn rsa_minimum_sizes() {
        assert_eq!(min_size(RSA_SIGNATURE_ALGORITHMS, "RS384"), Some(3072));
        assert_eq!(min_size(RSA_SIGNATURE_ALGORITHMS, "PS512"), Some(4096));
        assert_eq!(min_size(RSA_ENCRYPTION_ALGORITHMS, "RSA-OAEP-256"), Some(2048));
        assert_eq!(min_size(RSA_SIGNATURE_ALGORITHMS, "RS256s"), None);
    }

    #[test]
    fn parse_use_and_curves() {
        assert_eq!("sig".parse::<KeyUse>(), Ok(KeyUse::Sig));
        assert_eq!("enc".parse::<KeyUse>(), Ok(KeyUse::Enc));
        assert!("invalid".parse::<KeyUse>().is_err());
        assert_eq!("P-521".parse::<EcCurve>(), Ok(EcCurve::P521));
        assert!("secp256k1".parse::<EcCurve>().is_err());
        assert_eq!("X25519".parse::<OkpCurve>().map(|c| c.key_use()), Ok(KeyUse::Enc));
    }
}
