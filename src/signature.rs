use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Resource path the data collector API signs and serves.
pub const RESOURCE_PATH: &str = "/api/logs";

type HmacSha256 = Hmac<Sha256>;

/// RFC1123 timestamp for the x-ms-date header, e.g. `Sat, 01 Jan 2022 00:00:00 GMT`.
pub fn format_rfc1123(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Canonical string covered by the request signature.
///
/// `body_len` is the UTF-8 byte length of the serialized JSON body. The
/// fields are newline-joined with no trailing newline; any drift here
/// produces signatures the endpoint rejects.
pub fn string_to_sign(body_len: usize, date: &str) -> String {
    format!("POST\n{body_len}\napplication/json\nx-ms-date:{date}\n{RESOURCE_PATH}")
}

/// Authorization header value: `SharedKey {workspace_id}:{base64 digest}`.
///
/// `key` is the shared secret already decoded from base64. Deterministic in
/// (key, date, body_len); the token is only valid alongside an x-ms-date
/// header carrying the exact same `date`.
pub fn auth_signature(workspace_id: &str, key: &[u8], date: &str, body_len: usize) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(string_to_sign(body_len, date).as_bytes());
    let digest = B64.encode(mac.finalize().into_bytes());
    format!("SharedKey {workspace_id}:{digest}")
}
