//! Class-name normalization.
//!
//! Source datasets name the same class in superficially different ways:
//! WordNet-style numeric prefixes (`n02099601-golden_retriever`), mixed
//! case, hyphens versus underscores. Normalization collapses these
//! variants into one canonical key so the unifier can merge them.

/// Normalizes a raw class name into its canonical form.
///
/// Strips a leading `n<digits>-` identifier prefix, lowercases, replaces
/// every `-` with `_`, and trims surrounding whitespace. Returns `None`
/// when the name is a `.DS_Store` filesystem marker (case-insensitive)
/// or normalizes to an empty string; such entries carry no class and are
/// excluded from every downstream mapping.
pub fn normalize_class_name(raw: &str) -> Option<String> {
    let stripped = strip_numeric_prefix(raw);

    if stripped.to_lowercase().ends_with(".ds_store") {
        return None;
    }

    let name = stripped.to_lowercase().replace('-', "_").trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Strips a leading `n<digits>-` prefix, if present.
///
/// The prefix requires at least one digit followed by a hyphen; anything
/// short of that leaves the name untouched.
fn strip_numeric_prefix(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix('n') else {
        return raw;
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return raw;
    }

    match rest[digits_end..].strip_prefix('-') {
        Some(tail) => tail,
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_numeric_prefix_and_lowercases() {
        assert_eq!(
            normalize_class_name("n007-Golden-Retriever"),
            Some("golden_retriever".to_string())
        );
        assert_eq!(normalize_class_name("n1-A-B-C"), Some("a_b_c".to_string()));
    }

    #[test]
    fn lowercases_plain_names() {
        assert_eq!(normalize_class_name("Cat"), Some("cat".to_string()));
        assert_eq!(normalize_class_name("cat"), Some("cat".to_string()));
    }

    #[test]
    fn discards_ds_store_markers() {
        assert_eq!(normalize_class_name(".DS_Store"), None);
        assert_eq!(normalize_class_name(".ds_store"), None);
        assert_eq!(normalize_class_name("n123-.DS_Store"), None);
    }

    #[test]
    fn discards_empty_results() {
        assert_eq!(normalize_class_name(""), None);
        assert_eq!(normalize_class_name("   "), None);
        assert_eq!(normalize_class_name("n12-"), None);
    }

    #[test]
    fn leaves_non_matching_prefixes_alone() {
        // No digits between 'n' and '-': not an identifier prefix.
        assert_eq!(normalize_class_name("n-cat"), Some("n_cat".to_string()));
        // Digits but no hyphen terminator.
        assert_eq!(normalize_class_name("n42cat"), Some("n42cat".to_string()));
        // Prefix is only stripped at the start of the name.
        assert_eq!(
            normalize_class_name("wild n1-cat"),
            Some("wild n1_cat".to_string())
        );
    }

    #[test]
    fn converges_across_naming_variants() {
        let from_wordnet = normalize_class_name("n123-Cat");
        let plain = normalize_class_name("CAT");
        assert_eq!(from_wordnet, plain);
        assert_eq!(plain, Some("cat".to_string()));
    }
}
