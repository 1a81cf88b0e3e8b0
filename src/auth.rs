//! Admin credential check and token mint.
//!
//! One fixed salted hash, one comparison. The minted token is opaque:
//! base64 over `admin-{unix_ms}`, carried in the response body and in the
//! `adminToken` cookie. It is not a signed credential and nothing verifies
//! it later; the access gate only checks that some token is present.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;

/// bcrypt hash of the admin password ("admin123").
const ADMIN_PASSWORD_HASH: &str = "$2b$10$whgHrsZqAJq8JWvGmCeaHeUOOfbhFx94Mu7y7GocgSAD10K4LsCUq";

/// Cookie the gate looks for on `/admin/*` requests.
pub const ADMIN_COOKIE: &str = "adminToken";

/// Nominal cookie lifetime. Client-respected only; the server never
/// enforces expiry.
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24;

/// Constant-time comparison of the submitted password against the fixed
/// hash, via bcrypt's verifier.
pub fn verify_password(password: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, ADMIN_PASSWORD_HASH)
}

/// Mints the opaque admin token: base64 of `admin-{unix_ms}`. Encodes a
/// timestamp, nothing more.
pub fn mint_token() -> String {
    BASE64.encode(format!("admin-{}", Utc::now().timestamp_millis()))
}

/// `Set-Cookie` value installing the admin token for 24 hours. Not
/// HttpOnly: the admin pages read it client-side.
pub fn login_cookie(token: &str) -> String {
    format!("{ADMIN_COOKIE}={token}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax")
}

/// `Set-Cookie` value that clears the admin token.
pub fn logout_cookie() -> String {
    format!("{ADMIN_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_admin_password_and_rejects_others() {
        assert!(verify_password("admin123").expect("verify"));
        assert!(!verify_password("letmein").expect("verify"));
        assert!(!verify_password("").expect("verify"));
    }

    #[test]
    fn token_decodes_to_a_timestamped_marker() {
        let token = mint_token();
        let decoded = BASE64.decode(&token).expect("valid base64");
        let decoded = String::from_utf8(decoded).expect("utf8");
        assert!(decoded.starts_with("admin-"));
        let millis: i64 = decoded["admin-".len()..].parse().expect("millis");
        assert!(millis > 0);
    }

    #[test]
    fn cookies_carry_max_age_and_path() {
        let set = login_cookie("abc");
        assert!(set.starts_with("adminToken=abc;"));
        assert!(set.contains("Max-Age=86400"));
        assert!(set.contains("Path=/"));

        let clear = logout_cookie();
        assert!(clear.contains("Max-Age=0"));
    }
}
