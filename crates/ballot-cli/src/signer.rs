//! Caller identity resolution.
//!
//! The caller is taken from, in order: an explicit `--from` address, a hex
//! ed25519 private key (flag or `BALLOT_PRIVATE_KEY`), the configured
//! default account.

use ballot_types::Address;

/// Environment variable holding the caller's private key.
pub const PRIVATE_KEY_ENV: &str = "BALLOT_PRIVATE_KEY";

/// Derive the caller address from a 32-byte hex ed25519 seed.
pub fn address_from_private_key(key: &str) -> anyhow::Result<Address> {
    let digits = key.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    let bytes = hex::decode(digits)
        .map_err(|e| anyhow::anyhow!("Invalid private key hex: {}", e))?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("Private key must be 32 bytes, got {}", bytes.len()))?;

    let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
    Ok(Address::from_public_key(&signing_key.verifying_key().to_bytes()))
}

/// Pick the caller identity from the available sources.
pub fn resolve_caller(
    from: Option<&str>,
    private_key: Option<&str>,
    default_account: Option<&str>,
) -> anyhow::Result<Address> {
    if let Some(from) = from {
        return from
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --from address '{}': {}", from, e));
    }
    if let Some(key) = private_key {
        return address_from_private_key(key);
    }
    if let Some(account) = default_account {
        return account
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid default account '{}': {}", account, e));
    }
    anyhow::bail!(
        "No caller identity: pass --from, set {} or configure default_account",
        PRIVATE_KEY_ENV
    )
}
