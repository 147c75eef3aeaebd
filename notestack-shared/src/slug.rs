/// Tenant slug generation
///
/// Slugs are URL-safe unique tenant identifiers assigned at signup and
/// immutable afterwards. The base comes from the tenant name (or the email
/// local-part when no name is given): lowercased, with runs of
/// non-alphanumeric characters collapsed into single dashes. A random
/// 5-character base36 suffix makes the slug unique; uniqueness is
/// re-checked against the store for a bounded number of attempts before
/// falling back to a time-based suffix.
///
/// # Example
///
/// ```no_run
/// use notestack_shared::slug::generate_unique_slug;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let slug = generate_unique_slug(&pool, Some("Acme Corp"), "a@acme.test").await?;
/// assert!(slug.starts_with("acme-corp-"));
/// # Ok(())
/// # }
/// ```

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;

use crate::models::tenant::Tenant;

/// Suffix alphabet: lowercase base36
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix
const SUFFIX_LEN: usize = 5;

/// Attempts before falling back to a time-based suffix
const MAX_ATTEMPTS: usize = 10;

/// Lowercases the input and collapses non-alphanumeric runs to single dashes
///
/// Leading and trailing dashes are trimmed. An input with no alphanumeric
/// characters yields "tenant".
///
/// # Example
///
/// ```
/// use notestack_shared::slug::slugify;
///
/// assert_eq!(slugify("Acme Corp"), "acme-corp");
/// assert_eq!(slugify("  J.R. & Sons!  "), "j-r-sons");
/// assert_eq!(slugify("???"), "tenant");
/// ```
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true; // suppress leading dash

    for c in input.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }

    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "tenant".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Generates a random 5-character base36 suffix
fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// Encodes the current time as a base36 suffix (collision fallback)
fn timestamp_suffix() -> String {
    let mut millis = Utc::now().timestamp_millis().unsigned_abs();
    let mut out = Vec::new();

    loop {
        out.push(SUFFIX_CHARSET[(millis % 36) as usize]);
        millis /= 36;
        if millis == 0 {
            break;
        }
    }

    out.reverse();
    out.into_iter().map(|b| b as char).collect()
}

/// Generates a unique slug for a new tenant
///
/// The base is derived from `name` when present, otherwise from the local
/// part of `email`. Each attempt appends a fresh random suffix and checks
/// the store; after [`MAX_ATTEMPTS`] collisions the suffix falls back to
/// the current time in base36.
///
/// # Errors
///
/// Returns an error only if the uniqueness query fails.
pub async fn generate_unique_slug(
    pool: &PgPool,
    name: Option<&str>,
    email: &str,
) -> Result<String, sqlx::Error> {
    let base_source = match name {
        Some(n) if !n.trim().is_empty() => n,
        _ => email.split('@').next().unwrap_or("tenant"),
    };
    let base = slugify(base_source);

    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!("{}-{}", base, random_suffix());
        if !Tenant::slug_exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    Ok(format!("{}-{}", base, timestamp_suffix()))
}
