//! Format serializers
//!
//! Each serializer renders an [`Artifact`] in memory; the orchestrator decides
//! where (and whether) to write it.

mod delimited;
mod json;
mod keyvalue;
mod proto;
mod sql;

pub use delimited::render_delimited;
pub use json::render_json;
pub use keyvalue::{render_key_value, KEY_FIELD, VALUE_FIELD};
pub use proto::render_proto;
pub use sql::{SqlBatch, SqlSection};

use crate::types::Target;

/// One rendered output file
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub target: Target,
    pub file_name: String,
    pub contents: Vec<u8>,
    /// Records (or entries) contained in the artifact
    pub records: usize,
}

impl Artifact {
    pub fn contents_str(&self) -> &str {
        std::str::from_utf8(&self.contents).unwrap_or_default()
    }
}

/// Convert a mixed-case identifier to lower snake case.
///
/// An upper-case letter starts a new word when it follows a lower-case letter
/// or precedes one, so acronym runs stay together: `getHTTPResponseCode` →
/// `get_http_response_code`.
pub fn camel_to_snake(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev_lower = chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower || next_lower {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("CamelCase"), "camel_case");
        assert_eq!(camel_to_snake("getHTTPResponseCode"), "get_http_response_code");
        assert_eq!(camel_to_snake("ItemInfo"), "item_info");
        assert_eq!(camel_to_snake("lowercase"), "lowercase");
        assert_eq!(camel_to_snake("HTTP"), "http");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
        assert_eq!(camel_to_snake(""), "");
    }
}
