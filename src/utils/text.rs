use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Longest slug produced by [`slugify`]
pub const SLUG_MAX_LEN: usize = 80;

/// Placeholder the sheet editors use for "no photo yet"
const IMAGE_PLACEHOLDER: &str = "z";

/// Decompose to NFD and drop combining marks ("Città" -> "Citta")
pub fn fold_diacritics(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lookup form for synonym tables: folded, trimmed, lowercased
pub fn normalize_label(raw: &str) -> String {
    fold_diacritics(raw.trim()).to_lowercase()
}

/// URL-safe slug: `[a-z0-9]` runs joined by single hyphens, at most [`SLUG_MAX_LEN`] chars
pub fn slugify(input: &str) -> String {
    let folded = fold_diacritics(&input.to_lowercase());

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // only ASCII was pushed, so byte truncation is char-safe
    slug.truncate(SLUG_MAX_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Keep digits, `.` and `-`, then parse; `None` unless the result is finite
pub fn clean_coordinate(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Site-relative image path with exactly one leading slash; absolute URLs pass through
pub fn normalize_image_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == IMAGE_PLACEHOLDER {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(trimmed.to_string());
    }

    let mut path = trimmed.strip_prefix("./").unwrap_or(trimmed);
    path = path.trim_start_matches('/');
    path = path.strip_prefix("public/").unwrap_or(path);
    path = path.trim_start_matches('/');

    if path.is_empty() {
        return None;
    }

    Some(format!("/{path}"))
}

/// Comma-separated Traveller Path codes; pieces without a leading integer are dropped
pub fn parse_tp_codes(raw: &str) -> Option<Vec<i32>> {
    let codes: Vec<i32> = raw.split(',').filter_map(parse_leading_int).collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

/// Integer prefix of a cell ("3", " 4 ", "2.5" -> 2, "7a" -> 7)
fn parse_leading_int(piece: &str) -> Option<i32> {
    let piece = piece.trim();
    let (sign, digits) = match piece.as_bytes().first() {
        Some(b'-') => (-1, &piece[1..]),
        Some(b'+') => (1, &piece[1..]),
        _ => (1, piece),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    match digits[..end].parse::<i32>() {
        Ok(value) => Some(sign * value),
        Err(err) => {
            tracing::debug!(code = piece, "dropping Traveller Path code: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("Città"), "Citta");
        assert_eq!(fold_diacritics("crêperie"), "creperie");
        assert_eq!(normalize_label("  Caffè  "), "caffe");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Trattoria Da Mario Como"), "trattoria-da-mario-como");
        assert_eq!(slugify("  Caffè  dell'Orologio!! "), "caffe-dell-orologio");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Été à Sanremo"), "ete-a-sanremo");
    }

    #[test]
    fn test_slug_is_capped_without_trailing_hyphen() {
        let long = "ab ".repeat(60);
        let slug = slugify(&long);
        assert!(slug.len() <= SLUG_MAX_LEN);
        assert!(!slug.ends_with('-'));
        assert!(!slug.starts_with('-'));
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_clean_coordinate() {
        assert_eq!(clean_coordinate("45.4642° N"), Some(45.4642));
        assert_eq!(clean_coordinate(" 45.4642 "), Some(45.4642));
        assert_eq!(clean_coordinate("-9.08"), Some(-9.08));
        assert_eq!(clean_coordinate("n/a"), None);
        assert_eq!(clean_coordinate(""), None);
        assert_eq!(clean_coordinate("1.2.3"), None);
        assert_eq!(clean_coordinate("-"), None);
    }

    #[test]
    fn test_normalize_image_path() {
        assert_eq!(normalize_image_path("public/photo.jpg"), Some("/photo.jpg".to_string()));
        assert_eq!(normalize_image_path("./x.png"), Some("/x.png".to_string()));
        assert_eq!(normalize_image_path("images/a.jpg"), Some("/images/a.jpg".to_string()));
        assert_eq!(normalize_image_path("///a.jpg"), Some("/a.jpg".to_string()));
        assert_eq!(normalize_image_path("/public/a.jpg"), Some("/a.jpg".to_string()));
        assert_eq!(normalize_image_path("z"), None);
        assert_eq!(normalize_image_path("   "), None);
        assert_eq!(
            normalize_image_path("https://example.com/a.jpg"),
            Some("https://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_parse_tp_codes() {
        assert_eq!(parse_tp_codes("1, 3,x,12"), Some(vec![1, 3, 12]));
        assert_eq!(parse_tp_codes("2.5,7a"), Some(vec![2, 7]));
        assert_eq!(parse_tp_codes("abc"), None);
        assert_eq!(parse_tp_codes(""), None);
        assert_eq!(parse_tp_codes("1,99999999999"), Some(vec![1]));
        assert_eq!(parse_tp_codes("99999999999"), None);
    }
}
