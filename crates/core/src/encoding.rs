//! Text encoding for list-valued columns (amenities, photos).
//!
//! Lists are stored as JSON array text rather than native array columns. An
//! empty or missing list is stored as `NULL`.

/// Encode a list for storage. Empty and missing lists both encode to `None`.
pub fn encode_list(items: Option<&[String]>) -> Option<String> {
    match items {
        Some(items) if !items.is_empty() => {
            Some(serde_json::Value::from(items.to_vec()).to_string())
        }
        _ => None,
    }
}

/// Decode a stored list. `NULL` and the empty string decode to an empty list.
pub fn decode_list(raw: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s),
    }
}

/// Decode a stored list, substituting an empty list for malformed text.
///
/// Returns the decode error alongside so the caller can log it.
pub fn decode_list_lossy(raw: Option<&str>) -> (Vec<String>, Option<serde_json::Error>) {
    match decode_list(raw) {
        Ok(items) => (items, None),
        Err(e) => (Vec::new(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_and_missing_lists_encode_to_none() {
        assert_eq!(encode_list(None), None);
        assert_eq!(encode_list(Some(&[])), None);
    }

    #[test]
    fn list_encodes_as_json_array() {
        let items = strings(&["WiFi", "Parking"]);
        assert_eq!(
            encode_list(Some(&items)).as_deref(),
            Some(r#"["WiFi","Parking"]"#)
        );
    }

    #[test]
    fn null_and_blank_decode_to_empty() {
        assert!(decode_list(None).unwrap().is_empty());
        assert!(decode_list(Some("")).unwrap().is_empty());
    }

    #[test]
    fn stored_text_decodes_back() {
        let items = strings(&["Security Camera", "Electricity"]);
        let stored = encode_list(Some(&items));
        assert_eq!(decode_list(stored.as_deref()).unwrap(), items);
    }

    #[test]
    fn corrupted_text_degrades_to_empty() {
        let (items, err) = decode_list_lossy(Some("[\"WiFi\", "));
        assert!(items.is_empty());
        assert!(err.is_some());
    }

    #[test]
    fn non_array_json_degrades_to_empty() {
        let (items, err) = decode_list_lossy(Some(r#"{"wifi": true}"#));
        assert!(items.is_empty());
        assert!(err.is_some());
    }
}
