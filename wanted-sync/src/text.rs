//! String casing helpers for labels and field names.

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"place_of_birth"` -> `"Place of birth"`
pub fn title_case_from_snake(s: &str) -> String {
    capitalize(&snake_words(s).join(" "))
}

/// `"place_of_birth"` -> `"placeOfBirth"`
pub fn camel_case(s: &str) -> String {
    snake_words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn snake_words(s: &str) -> Vec<&str> {
    s.split('_').filter(|part| !part.is_empty()).collect()
}
