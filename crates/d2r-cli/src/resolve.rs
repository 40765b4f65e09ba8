//! Office ID resolution.
//!
//! Commands accept either a full UUID or an unambiguous hex prefix of one;
//! the prefix form saves retyping ids off the `offices` listing.

use anyhow::{Context, Result, bail};
use sqlx::PgPool;
use uuid::Uuid;

use d2r_db::queries::offices;

/// Resolve a user-supplied office identifier to a stored office id.
///
/// Full UUIDs short-circuit without touching the database; anything else is
/// treated as an id prefix and looked up. Ambiguous prefixes are an error,
/// unknown ones too.
pub async fn resolve_office_id(pool: &PgPool, input: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }

    if !is_hex_prefix(input) {
        bail!("invalid office ID: {input:?} (not a UUID or a hex prefix)");
    }

    let row = offices::find_office_by_prefix(pool, input)
        .await?
        .with_context(|| format!("no office matches id prefix {input:?}"))?;

    Ok(row.id)
}

/// True if the input could be the leading characters of a canonical
/// hyphenated UUID.
fn is_hex_prefix(input: &str) -> bool {
    !input.is_empty()
        && input.len() < 36
        && input.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_prefix_detection() {
        assert!(is_hex_prefix("550e84"));
        assert!(is_hex_prefix("550e8400-e29b"));
        assert!(!is_hex_prefix(""));
        assert!(!is_hex_prefix("not-a-prefix"));
        assert!(!is_hex_prefix("550e8400-e29b-41d4-a716-446655440000"));
    }
}
