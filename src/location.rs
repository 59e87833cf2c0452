//! Query-string view of the browser state.
//!
//! A [`Location`] is an ordered list of query parameters. Edits keep every
//! parameter they do not touch, so links carrying extra parameters survive
//! navigation. [`UrlState`] is the typed projection read back from it.

use url::form_urlencoded;

pub const PAGE_PARAM: &str = "page";
pub const PRODUCT_PARAM: &str = "productId";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    params: Vec<(String, String)>,
}

impl Location {
    /// Parse a query string. Accepts `?a=b`, `a=b`, or a full URL; anything
    /// up to the first `?` and any `#fragment` are ignored.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let input = input.split('#').next().unwrap_or("");
        let query = match input.split_once('?') {
            Some((_, query)) => query,
            // Bare paths like "/products" carry no parameters.
            None if !input.contains('=') => "",
            None => input,
        };

        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing the first occurrence in place and dropping
    /// duplicates, or append it when absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut seen = false;
        self.params.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.clone();
            true
        });
        if !seen {
            self.params.push((key.to_string(), value));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `""` when there are no parameters, otherwise `?k=v&...`.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("?{}", encoded)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Page and selection as encoded in a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    pub page: u32,
    pub product_id: Option<String>,
}

impl Default for UrlState {
    fn default() -> Self {
        Self {
            page: 1,
            product_id: None,
        }
    }
}

impl UrlState {
    pub fn deserialize(location: &Location) -> Self {
        Self {
            page: location.get(PAGE_PARAM).map(parse_page).unwrap_or(1),
            product_id: location
                .get(PRODUCT_PARAM)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    #[cfg(test)]
    pub fn serialize(&self) -> Location {
        let mut location = Location::default();
        location.set(PAGE_PARAM, self.page.to_string());
        if let Some(id) = &self.product_id {
            location.set(PRODUCT_PARAM, id.clone());
        }
        location
    }
}

/// Positive page number, falling back to 1 for anything else
fn parse_page(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(page) => page,
    }
}
