//! Identifier case conversion for generated source files.

/// Plurals that do not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("statuses", "status"),
];

/// Words that are the same in singular and plural.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "media",
    "news",
    "series",
    "sheep",
    "species",
];

/// Split an identifier into lowercase words.
///
/// Words break on any non-alphanumeric character and on case changes, so
/// `price-bands`, `price_bands`, `PriceBands`, and `priceBands` all yield
/// `["price", "bands"]`. An uppercase run followed by a lowercase letter
/// splits before its last capital (`HTTPServer` → `http`, `server`).
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        // current is non-empty only when chars[i - 1] was alphanumeric
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Singular form of one lowercase English word.
pub fn singularize(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }

    for suffix in ["sses", "ches", "shes", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

/// StudlyCase of the singular form: `price-bands` → `PriceBand`.
pub fn singular_studly(input: &str) -> String {
    let mut words = words(input);
    if let Some(last) = words.last_mut() {
        *last = singularize(last);
    }
    words.iter().map(|w| capitalize(w)).collect()
}

/// snake_case: `PriceBand` → `price_band`.
pub fn snake_case(input: &str) -> String {
    words(input).join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
