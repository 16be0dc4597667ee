//! Request key generation.

use sha2::{Digest, Sha256};

use crate::Request;

/// Compute the lookup key for a request: SHA-256 over method and URL.
pub fn compute_request_key(request: &Request) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.method().as_bytes());
    hasher.update(b"\n");
    hasher.update(request.url().as_str().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_hash_stability() {
        let hash1 = compute_request_key(&Request::get(url("https://example.com/")));
        let hash2 = compute_request_key(&Request::get(url("https://example.com/")));
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_different_method() {
        let get = compute_request_key(&Request::get(url("https://example.com/")));
        let post = compute_request_key(&Request::new("POST", url("https://example.com/")));
        assert_ne!(get, post);
    }

    #[test]
    fn test_hash_ignores_fragment() {
        let plain = compute_request_key(&Request::get(url("https://example.com/page")));
        let anchored = compute_request_key(&Request::get(url("https://example.com/page#intro")));
        assert_eq!(plain, anchored);
    }

    #[test]
    fn test_hash_format() {
        let hash = compute_request_key(&Request::get(url("https://example.com/")));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
