use std::collections::BTreeMap;

use url::form_urlencoded;

/// Renders `query` as `?k=v&...` with keys in ascending order and every key
/// and value form-urlencoded. An empty map renders as an empty string.
#[must_use]
pub fn encode_query(query: &BTreeMap<String, String>) -> String {
    if query.is_empty() {
        return String::new();
    }
    form_urlencoded::Serializer::new(String::from("?"))
        .extend_pairs(query.iter())
        .finish()
}
