use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::{AppError, AppResult};

/// Argon2id cost: 19 MiB of memory, two passes, one lane.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const LANES: u32 = 1;

/// Well-formed argon2id hash with the same cost as [`hash_password`] that no
/// password matches. Verifying against it keeps the unknown-username path as
/// slow as the wrong-password path.
pub(crate) const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn hasher() -> AppResult<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, LANES, None).map_err(|e| {
        error!(error = %e, "invalid argon2 parameters");
        AppError::Internal(anyhow::anyhow!(e.to_string()))
    })?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `plain` under a fresh random salt. The PHC string carries salt and cost.
pub fn hash_password(plain: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = hasher()?
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal(anyhow::anyhow!(e.to_string()))
        })?;
    Ok(phc.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `stored` is not a PHC string.
pub fn verify_password(plain: &str, stored: &str) -> AppResult<bool> {
    let phc = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is unreadable");
        AppError::Internal(anyhow::anyhow!(e.to_string()))
    })?;
    Ok(hasher()?.verify_password(plain.as_bytes(), &phc).is_ok())
}
