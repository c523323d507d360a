//! Query-string codec for list-page navigation.
//!
//! Sort and page mutations rebuild the query string while preserving every
//! other parameter in its original position, so filter state survives
//! navigation. Keys the codec does not know about pass through untouched,
//! and sort keys are not validated here; the server ignores unknown keys.

/// A parsed query string: ordered key/value pairs.
pub type QueryPairs = Vec<(String, String)>;

pub const PAGE_KEY: &str = "page";
pub const SORT_KEY: &str = "sortBy";

/// Parse a raw query string (without the leading `?`) into ordered pairs.
///
/// Keys without `=` parse to an empty value. Percent escapes and `+` are
/// decoded.
pub fn parse_query(query: &str) -> QueryPairs {
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(part), String::new()),
        })
        .collect()
}

/// Encode pairs back into a query string, preserving their order.
pub fn encode_query(pairs: &QueryPairs) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Set or clear one parameter, preserving the position of an existing key.
///
/// `Some(value)` replaces the first occurrence in place (dropping any
/// duplicates) or appends when absent; `None` removes the key entirely:
/// absence, not an empty string.
pub fn with_param(pairs: &QueryPairs, key: &str, value: Option<&str>) -> QueryPairs {
    let mut out: QueryPairs = Vec::with_capacity(pairs.len() + 1);
    let mut replaced = false;
    for (existing_key, existing_value) in pairs {
        if existing_key == key {
            if let Some(value) = value {
                if !replaced {
                    out.push((key.to_string(), value.to_string()));
                    replaced = true;
                }
            }
        } else {
            out.push((existing_key.clone(), existing_value.clone()));
        }
    }
    if let Some(value) = value {
        if !replaced {
            out.push((key.to_string(), value.to_string()));
        }
    }
    out
}

/// Navigate to a page, keeping everything else.
pub fn with_page(pairs: &QueryPairs, page: i64) -> QueryPairs {
    with_param(pairs, PAGE_KEY, Some(&page.to_string()))
}

/// Set or clear the sort key. Either way the page resets to 1: a different
/// ordering restarts pagination from the top.
pub fn with_sort(pairs: &QueryPairs, sort_by: Option<&str>) -> QueryPairs {
    with_page(&with_param(pairs, SORT_KEY, sort_by), 1)
}

/// First value for a key, if present.
pub fn param<'a>(pairs: &'a QueryPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value.as_str())
}

// ---------------------------------------------------------------------------
// Percent codec
// ---------------------------------------------------------------------------

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for &byte in raw.as_bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else if byte == b' ' {
            out.push('+');
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match hex_pair(bytes.get(i + 1).copied(), bytes.get(i + 2).copied()) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: Option<u8>, low: Option<u8>) -> Option<u8> {
    let high = (high? as char).to_digit(16)?;
    let low = (low? as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Parse / encode --

    #[test]
    fn parse_splits_pairs_in_order() {
        let pairs = parse_query("page=3&cutType=aba");
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("cutType".to_string(), "aba".to_string()),
            ]
        );
    }

    #[test]
    fn parse_handles_empty_and_valueless() {
        assert!(parse_query("").is_empty());
        assert_eq!(parse_query("flag"), vec![("flag".to_string(), String::new())]);
    }

    #[test]
    fn codec_round_trips_escapes() {
        let pairs = vec![("material".to_string(), "algodão cru".to_string())];
        let encoded = encode_query(&pairs);
        assert_eq!(encoded, "material=algod%C3%A3o+cru");
        assert_eq!(parse_query(&encoded), pairs);
    }

    #[test]
    fn decode_leaves_bad_escape_literal() {
        assert_eq!(decode_component("50%"), "50%");
        assert_eq!(decode_component("a%zz"), "a%zz");
    }

    // -- Mutations --

    #[test]
    fn setting_sort_resets_page_and_preserves_filters() {
        let pairs = parse_query("page=3&cutType=aba");
        let next = with_sort(&pairs, Some("modelName"));
        assert_eq!(encode_query(&next), "page=1&cutType=aba&sortBy=modelName");
    }

    #[test]
    fn clearing_sort_removes_key_entirely() {
        let pairs = parse_query("page=3&sortBy=modelName&cutType=aba");
        let next = with_sort(&pairs, None);
        assert_eq!(encode_query(&next), "page=1&cutType=aba");
        assert!(param(&next, SORT_KEY).is_none());
    }

    #[test]
    fn with_page_replaces_in_place() {
        let pairs = parse_query("cutType=aba&page=2&material=cotton");
        let next = with_page(&pairs, 5);
        assert_eq!(encode_query(&next), "cutType=aba&page=5&material=cotton");
    }

    #[test]
    fn with_page_appends_when_absent() {
        let pairs = parse_query("cutType=aba");
        let next = with_page(&pairs, 2);
        assert_eq!(encode_query(&next), "cutType=aba&page=2");
    }

    #[test]
    fn with_param_drops_duplicate_keys() {
        let pairs = parse_query("page=1&page=2&cutType=aba");
        let next = with_page(&pairs, 4);
        assert_eq!(encode_query(&next), "page=4&cutType=aba");
    }

    #[test]
    fn unknown_params_pass_through_untouched() {
        let pairs = parse_query("mystery=42&page=1");
        let next = with_sort(&pairs, Some("sku"));
        assert_eq!(param(&next, "mystery"), Some("42"));
    }
}
