use serde::Serialize;

/// A relation key split into display parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Place {
    pub city: String,
    pub country: String,
}

/// Split a `city-country` token on its last hyphen and title-case both halves.
///
/// `new_york-usa` → `New York` / `Usa`. Hyphens left in the city half stay
/// (`saint-denis-france` → `Saint-Denis`). A token without a hyphen is all
/// city.
pub fn parse_location(token: &str) -> Place {
    match token.rsplit_once('-') {
        Some((city, country)) => Place {
            city: title_case(city),
            country: title_case(country),
        },
        None => Place {
            city: title_case(token),
            country: String::new(),
        },
    }
}

fn title_case(part: &str) -> String {
    part.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
