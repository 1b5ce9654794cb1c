//! Nested price lookups inside a JSON payload.

use std::fmt;

use serde_json::Value;

/// One step into a JSON document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
    /// Last element of an array.
    Last,
}

/// Path to a numeric field, e.g. `quoteResponse.result[0].regularMarketPrice`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricePath(Vec<PathSegment>);

impl PricePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Path made only of object keys.
    pub fn keys(keys: &[&'static str]) -> Self {
        Self(keys.iter().map(|k| PathSegment::Key(*k)).collect())
    }

    pub fn key(mut self, key: &'static str) -> Self {
        self.0.push(PathSegment::Key(key));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    pub fn last(mut self) -> Self {
        self.0.push(PathSegment::Last);
        self
    }

    /// Follow the path and read a number.
    ///
    /// Numeric strings are accepted (some providers quote prices as text).
    /// A missing step, a non-numeric leaf, or a value that is not a finite
    /// positive number yields `None`, so the next path gets a chance.
    pub fn extract(&self, root: &Value) -> Option<f64> {
        let mut node = root;
        for segment in &self.0 {
            node = match segment {
                PathSegment::Key(key) => node.as_object()?.get(*key)?,
                PathSegment::Index(i) => node.as_array()?.get(*i)?,
                PathSegment::Last => node.as_array()?.last()?,
            };
        }

        let price = match node {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
            _ => None,
        }?;
        (price.is_finite() && price > 0.0).then_some(price)
    }
}

impl fmt::Display for PricePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
                PathSegment::Last => f.write_str("[-1]")?,
            }
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_nested_field() {
        let body = json!({
            "quoteResponse": { "result": [ { "regularMarketPrice": 2345.6 } ] }
        });
        let path = PricePath::keys(&["quoteResponse", "result"])
            .index(0)
            .key("regularMarketPrice");
        assert_eq!(path.extract(&body), Some(2345.6));
        assert_eq!(
            path.to_string(),
            "quoteResponse.result[0].regularMarketPrice"
        );
    }

    #[test]
    fn test_extract_last_element() {
        let body = json!({ "series": [ { "value": 1.0 }, { "value": 2.5 } ] });
        let path = PricePath::keys(&["series"]).last().key("value");
        assert_eq!(path.extract(&body), Some(2.5));
    }

    #[test]
    fn test_extract_numeric_string() {
        let body = json!({ "price": "2,345.10" });
        assert_eq!(PricePath::keys(&["price"]).extract(&body), Some(2345.1));
    }

    #[test]
    fn test_missing_nesting_is_none_not_zero() {
        let body = json!({ "quoteResponse": { "result": [] } });
        let path = PricePath::keys(&["quoteResponse", "result"])
            .index(0)
            .key("regularMarketPrice");
        assert_eq!(path.extract(&body), None);

        let body = json!({ "price": null });
        assert_eq!(PricePath::keys(&["price"]).extract(&body), None);

        let body = json!({ "price": "n/a" });
        assert_eq!(PricePath::keys(&["price"]).extract(&body), None);
    }

    #[test]
    fn test_non_positive_leaf_is_none() {
        let path = PricePath::keys(&["price"]);
        assert_eq!(path.extract(&json!({ "price": 0 })), None);
        assert_eq!(path.extract(&json!({ "price": -1.5 })), None);
        assert_eq!(path.extract(&json!({ "price": "0.00" })), None);
        assert_eq!(path.extract(&json!({ "price": "inf" })), None);
    }
}
