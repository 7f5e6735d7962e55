//! Comma-separated id lists (`brandId`, `categoryId`)

/// Split a raw list value into ids
///
/// Surrounding whitespace is trimmed, empty entries are dropped and only the
/// first occurrence of a duplicated id is kept. Relative order is preserved.
#[must_use]
pub fn split_ids(raw: &str) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Join ids back into a list value
#[must_use]
pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

/// Normalize a raw list value (trim, dedupe, drop empties)
#[must_use]
pub fn normalize(raw: &str) -> String {
    join_ids(&split_ids(raw))
}

/// Whether `id` can be stored as one list entry
///
/// Ids are non-empty and carry no separator or whitespace, so they survive a
/// split unchanged.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(',') && !id.chars().any(char::is_whitespace)
}

/// Position of `id` in a raw list value
#[must_use]
pub fn position_of(raw: &str, id: &str) -> Option<usize> {
    split_ids(raw).iter().position(|existing| *existing == id)
}

/// Flip membership of `id`: remove it if present, append it otherwise
#[must_use]
pub fn toggle_id(raw: &str, id: &str) -> String {
    let mut ids = split_ids(raw);
    if let Some(pos) = ids.iter().position(|existing| *existing == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
    join_ids(&ids)
}

/// Insert `id` at `index` (clamped to the end) unless it is already present
#[must_use]
pub fn insert_id_at(raw: &str, id: &str, index: usize) -> String {
    let mut ids = split_ids(raw);
    if !ids.contains(&id) {
        ids.insert(index.min(ids.len()), id);
    }
    join_ids(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids_normalizes() {
        assert_eq!(split_ids(" b1, b2 ,,b1,b3"), vec!["b1", "b2", "b3"]);
        assert!(split_ids("").is_empty());
    }

    #[test]
    fn test_toggle_appends_missing() {
        assert_eq!(toggle_id("b1,b2", "b3"), "b1,b2,b3");
        assert_eq!(toggle_id("", "b3"), "b3");
    }

    #[test]
    fn test_toggle_removes_present_keeping_order() {
        assert_eq!(toggle_id("b1,b2,b3", "b2"), "b1,b3");
        assert_eq!(toggle_id("b1", "b1"), "");
    }

    #[test]
    fn test_toggle_absent_twice_restores_original() {
        let once = toggle_id("b1,b2,b3", "b4");
        assert_eq!(toggle_id(&once, "b4"), "b1,b2,b3");
    }

    #[test]
    fn test_insert_id_at() {
        assert_eq!(insert_id_at("b1,b3", "b2", 1), "b1,b2,b3");
        assert_eq!(insert_id_at("b1", "b2", 9), "b1,b2");
        assert_eq!(insert_id_at("b1,b2", "b2", 0), "b1,b2");
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("b1"));
        assert!(is_valid_id("c-10_x"));
        for id in ["", "b1,b2", " b1", "b 1", "b1\t", ","] {
            assert!(!is_valid_id(id), "{id:?}");
        }
    }

    #[test]
    fn test_position_of() {
        assert_eq!(position_of("b1,b2,b3", "b2"), Some(1));
        assert_eq!(position_of("b1", "b9"), None);
    }
}
