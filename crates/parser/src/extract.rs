//! Pieces of operation extraction shared by both walkers

use indexmap::IndexMap;
use openapi_docgen_common::{ApiResource, Endpoint, DEFAULT_RESOURCE};

/// Path-item keys that declare an operation
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Name of the parameter synthesized from a request body
pub const BODY_PARAMETER: &str = "body";

/// Prefix of specification extension keys
pub const EXTENSION_PREFIX: &str = "x-";

pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

/// Whether a key in the Paths or Responses object is an `x-` extension
/// rather than a path or status code
pub fn is_extension(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX)
}

/// Working map of resources keyed by tag, in first-seen order
#[derive(Debug, Default)]
pub struct ResourceGroups {
    resources: IndexMap<String, ApiResource>,
}

impl ResourceGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint to the resource for `tag`, creating it on first use
    ///
    /// Operations without a tag land in [`DEFAULT_RESOURCE`].
    pub fn add(&mut self, tag: Option<&str>, endpoint: Endpoint) {
        let name = tag.unwrap_or(DEFAULT_RESOURCE);
        self.resources
            .entry(name.to_string())
            .or_insert_with(|| ApiResource::new(name))
            .endpoints
            .push(endpoint);
    }

    pub fn into_resources(self) -> Vec<ApiResource> {
        self.resources.into_values().collect()
    }
}

/// Push `item` unless it is already present
pub fn push_unique(items: &mut Vec<String>, item: &str) {
    if !items.iter().any(|existing| existing == item) {
        items.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(url: &str) -> Endpoint {
        Endpoint {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut groups = ResourceGroups::new();
        groups.add(Some("pets"), endpoint("/pets"));
        groups.add(None, endpoint("/health"));
        groups.add(Some("pets"), endpoint("/pets/{id}"));

        let resources = groups.into_resources();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["pets", "Default"]);

        let urls: Vec<&str> = resources[0].endpoints.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["/pets", "/pets/{id}"]);
    }

    #[test]
    fn test_push_unique() {
        let mut items = Vec::new();
        push_unique(&mut items, "application/json");
        push_unique(&mut items, "application/xml");
        push_unique(&mut items, "application/json");
        assert_eq!(items, vec!["application/json", "application/xml"]);
    }

    #[test]
    fn test_http_methods() {
        assert!(is_http_method("get"));
        assert!(is_http_method("trace"));
        assert!(!is_http_method("parameters"));
        assert!(!is_http_method("GET"));
    }

    #[test]
    fn test_extension_keys() {
        assert!(is_extension("x-generated"));
        assert!(!is_extension("/x-files"));
        assert!(!is_extension("200"));
    }
}
