use crate::config::HashingSettings;
use crate::domain::ports::PasswordHasher;
use crate::domain::value_objects::HashedPassword;
use crate::error::{AccountsError, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Hash length in bytes.
const HASH_LEN: usize = 32;

/// Password hasher using Argon2id with configurable cost parameters.
///
/// Hashes are PHC strings that embed their own parameters and 16-byte salt,
/// so verification keeps working after the configured costs change.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new(settings: &HashingSettings) -> Result<Self> {
        let params = Params::new(
            settings.memory_kib,
            settings.time_cost,
            settings.parallelism,
            Some(HASH_LEN),
        )
        .map_err(|e| AccountsError::Config(format!("invalid argon2 parameters: {e}")))?;
        let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
        Ok(Self { argon, params })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<HashedPassword> {
        if password.is_empty() {
            return Err(AccountsError::validation("Password must not be empty"));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AccountsError::Hashing(e.to_string()))?;
        Ok(HashedPassword::new(hash.to_string()))
    }

    fn verify(&self, password: &str, hashed: &HashedPassword) -> Result<bool> {
        if password.is_empty() || hashed.as_str().is_empty() {
            return Err(AccountsError::validation(
                "Password and hash must not be empty",
            ));
        }
        let parsed = PasswordHash::new(hashed.as_str())
            .map_err(|e| AccountsError::Hashing(format!("invalid hash format: {e}")))?;
        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AccountsError::Hashing(e.to_string())),
        }
    }

    fn needs_rehash(&self, hashed: &HashedPassword) -> Result<bool> {
        let parsed = PasswordHash::new(hashed.as_str())
            .map_err(|e| AccountsError::Hashing(format!("invalid hash format: {e}")))?;
        if parsed.algorithm.as_str() != self.algorithm() {
            return Ok(true);
        }
        let stored = Params::try_from(&parsed)
            .map_err(|e| AccountsError::Hashing(format!("invalid hash parameters: {e}")))?;
        Ok(stored.m_cost() != self.params.m_cost()
            || stored.t_cost() != self.params.t_cost()
            || stored.p_cost() != self.params.p_cost())
    }

    fn algorithm(&self) -> &'static str {
        "argon2id"
    }
}
