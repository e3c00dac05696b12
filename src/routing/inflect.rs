//! Resource name inflection.
//!
//! # Responsibilities
//! - Derive the singular form of a plural resource identifier
//!   (`blogs` → `blog`, `categories` → `category`)
//! - Used to name nested id placeholders and route names
//!
//! # Design Decisions
//! - Pure function over ASCII identifiers, no global inflection registry
//! - Only the last `_`-separated word is inflected (`blog_posts` → `blog_post`)
//! - Rule order matters: irregulars and uncountables first, then suffix rules

/// Words that have no distinct singular form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "jeans",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Irregular plural → singular pairs.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("movies", "movie"),
    ("zombies", "zombie"),
    ("shoes", "shoe"),
    ("axes", "axis"),
    ("quizzes", "quiz"),
];

/// Suffix rules applied in order; the first matching suffix wins.
/// Each entry is (plural suffix, replacement).
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("statuses", "status"),
    ("buses", "bus"),
    ("yses", "ysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hives", "hive"),
    ("tives", "tive"),
    ("lves", "lf"),
    ("rves", "rf"),
    ("ives", "ife"),
    ("ies", "y"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("oes", "o"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Returns the singular form of a resource identifier.
///
/// Words that are already singular, or that match no rule, are returned
/// unchanged.
pub fn singularize(word: &str) -> String {
    let (head, last) = match word.rfind('_') {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    };

    format!("{}{}", head, singularize_word(last))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return (*singular).to_string();
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if lower.len() > 1 && lower.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            return format!("{}{}", stem, replacement);
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(singularize("blogs"), "blog");
        assert_eq!(singularize("articles"), "article");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("addresses"), "address");
    }

    #[test]
    fn test_already_singular() {
        assert_eq!(singularize("foo"), "foo");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("analysis"), "analysis");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("sheep"), "sheep");
        assert_eq!(singularize("news"), "news");
    }

    #[test]
    fn test_f_endings() {
        assert_eq!(singularize("wolves"), "wolf");
        assert_eq!(singularize("knives"), "knife");
        assert_eq!(singularize("archives"), "archive");
        assert_eq!(singularize("objectives"), "objective");
    }

    #[test]
    fn test_compound_identifier() {
        assert_eq!(singularize("blog_posts"), "blog_post");
        assert_eq!(singularize("sales_people"), "sales_person");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(singularize(""), "");
        assert_eq!(singularize("s"), "s");
    }
}
