//! Password hashing in the crypt(3) family of formats.

use crate::{Error, Result};

use pwhash::{bcrypt, md5_crypt, sha256_crypt, sha512_crypt, HashSetup};

/// Markers identifying text that is already a password hash.
const HASH_PREFIXES: &[&str] = &["$2a$", "$2b$", "$2y$", "$1$", "$5$", "$6$"];

/// Hashes shorter than this are treated as plaintext.
const MIN_HASH_LEN: usize = 30;

/// The sha-crypt family rejects fewer rounds than this.
const MIN_SHA_ROUNDS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// bcrypt (`$2b$`); rounds are the cost factor.
    #[default]
    Bcrypt,

    /// md5-crypt (`$1$`); rounds are ignored.
    Md5Crypt,

    /// sha256-crypt (`$5$`)
    Sha256Crypt,

    /// sha512-crypt (`$6$`)
    Sha512Crypt,
}

/// Hashes `plaintext` with `algorithm`.
pub fn hash(plaintext: &str, algorithm: Algorithm, rounds: u32) -> Result<String> {
    let hashed = match algorithm {
        Algorithm::Bcrypt => bcrypt::hash_with(
            bcrypt::BcryptSetup {
                cost: Some(rounds),
                variant: Some(bcrypt::BcryptVariant::V2b),
                ..Default::default()
            },
            plaintext,
        ),
        #[allow(deprecated)]
        Algorithm::Md5Crypt => md5_crypt::hash(plaintext),
        #[allow(deprecated)]
        Algorithm::Sha256Crypt => sha256_crypt::hash_with(
            HashSetup {
                salt: None,
                rounds: Some(rounds.max(MIN_SHA_ROUNDS)),
            },
            plaintext,
        ),
        Algorithm::Sha512Crypt => sha512_crypt::hash_with(
            HashSetup {
                salt: None,
                rounds: Some(rounds.max(MIN_SHA_ROUNDS)),
            },
            plaintext,
        ),
    };

    hashed.map_err(|err| Error::from(anyhow::Error::new(err)).context(crate::err!("hashing password")))
}

/// Returns `true` when `plaintext` matches `hashed`, for any supported format.
pub fn verify(plaintext: &str, hashed: &str) -> bool {
    pwhash::unix::verify(plaintext, hashed)
}

/// Returns `true` when `value` already looks like a password hash and must
/// not be hashed again.
pub fn is_hashed(value: &str) -> bool {
    value.len() >= MIN_HASH_LEN && HASH_PREFIXES.iter().any(|prefix| value.contains(prefix))
}
