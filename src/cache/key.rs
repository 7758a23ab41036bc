//! Cache Key Derivation
//!
//! Builds deterministic cache keys from an endpoint and its parameters.
//! Two logically-equal parameter sets that differ only in ordering must
//! produce identical keys, so parameter names are sorted before
//! concatenation. Canonicalization happens here, not in the transport.

// == Cache Key ==
/// Derives the cache key for `(endpoint, params)`.
///
/// Returns the endpoint alone when there are no parameters, otherwise
/// `endpoint?k1=v1&k2=v2...` with parameter names sorted ascending.
pub fn cache_key(endpoint: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let query: Vec<String> = sorted
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    format!("{}?{}", endpoint, query.join("&"))
}
