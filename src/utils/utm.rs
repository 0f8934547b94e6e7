//! UTM parameter merging.
//!
//! The merged destination is what gets persisted; the raw UTM map is kept on
//! the record for display only.

use std::collections::HashMap;
use url::Url;
use url::form_urlencoded;

/// Merges `utms` into `base` as query parameters.
///
/// Existing query parameters with a matching key are overwritten. When the
/// base cannot be parsed as an absolute URL, falls back to naive
/// concatenation of a form-encoded query string. Keys are appended in sorted
/// order so the same inputs always produce the same destination.
pub fn merge_utms(base: &str, utms: Option<&HashMap<String, String>>) -> String {
    let Some(utms) = utms.filter(|m| !m.is_empty()) else {
        return base.to_string();
    };

    let mut keys: Vec<&String> = utms.keys().collect();
    keys.sort();

    match Url::parse(base) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| !utms.contains_key(k.as_ref()))
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();

            {
                let mut pairs = url.query_pairs_mut();
                pairs.clear();
                for (k, v) in &kept {
                    pairs.append_pair(k, v);
                }
                for k in keys {
                    pairs.append_pair(k, &utms[k]);
                }
            }

            url.to_string()
        }
        Err(_) => {
            let mut query = form_urlencoded::Serializer::new(String::new());
            for k in keys {
                query.append_pair(k, &utms[k]);
            }

            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{}{}{}", base, separator, query.finish())
        }
    }
}
