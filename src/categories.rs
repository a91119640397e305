use serde::Serialize;

/// A point-of-interest category shown as a filter toggle on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub query: &'static str,
    pub color: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Adventure",
        query: "adventure park",
        color: "#FF6B6B",
    },
    Category {
        name: "Nature and Wildlife",
        query: "park",
        color: "#4CAF50",
    },
    Category {
        name: "Museums",
        query: "museum",
        color: "#9C27B0",
    },
    Category {
        name: "Art Galleries",
        query: "art gallery",
        color: "#FF9800",
    },
    Category {
        name: "Local Cuisines",
        query: "restaurant",
        color: "#E91E63",
    },
    Category {
        name: "Historical Places",
        query: "historical monument",
        color: "#795548",
    },
    Category {
        name: "Temples",
        query: "temple",
        color: "#FFC107",
    },
];

/// Keywords a reported POI category must contain for a query to accept it.
/// The search API tags results loosely, so each query narrows what counts as a hit.
const RELEVANCE_RULES: &[(&str, &[&str])] = &[
    ("adventure park", &["amusement", "park"]),
    ("park", &["park"]),
    ("museum", &["museum", "gallery"]),
    ("art gallery", &["gallery", "art"]),
    ("restaurant", &["restaurant", "food"]),
    (
        "historical monument",
        &[
            "historical",
            "monument",
            "heritage",
            "fort",
            "palace",
            "archaeological",
        ],
    ),
    ("temple", &["temple", "religious"]),
];

/// Keywords that disqualify a category even when a rule keyword matched.
const EXCLUSION_RULES: &[(&str, &[&str])] = &[("park", &["parking"])];

pub fn find_by_query(query: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.query == query)
}

/// Whether a single reported POI category counts as a hit for `query`.
///
/// Queries outside the rule table fall back to a plain substring match
/// against the lower-cased query text.
pub fn category_matches(query: &str, reported: &str) -> bool {
    let reported = reported.to_lowercase();

    let Some((_, keywords)) = RELEVANCE_RULES.iter().find(|(q, _)| *q == query) else {
        return reported.contains(&query.to_lowercase());
    };

    let excluded = EXCLUSION_RULES
        .iter()
        .find(|(q, _)| *q == query)
        .is_some_and(|(_, words)| words.iter().any(|w| reported.contains(w)));

    !excluded && keywords.iter().any(|k| reported.contains(k))
}
