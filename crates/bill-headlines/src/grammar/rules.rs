//! Built-in superlative rule set.

pub const START_SYMBOL: &str = "origin";

const PLACES: &[&str] = &[
    "world's",
    "country's",
    "earth's",
    "history's",
    "our",
    "the",
    "america's",
    "our country's",
    "the earth's",
    "the world's",
];

const SUPERLATIVES: &[&str] = &[
    "greatest", "best", "bravest", "biggest", "brightest", "classiest", "cleanest", "cleverest",
    "coolest", "fanciest", "finest", "grandest", "happiest", "humblest", "largest", "newest",
    "neatest", "prettiest", "shiniest", "smartest", "strongest", "toughest", "wisest",
    "proudest",
];

const ADJECTIVES: &[&str] = &[
    "amazing",
    "wonderful",
    "tremendous",
    "mindboggling",
    "mind-blowing",
    "stupendous",
];

const INTENSIFIERS: &[&str] = &["most"];

pub(crate) fn superlative_rules() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (START_SYMBOL, vec!["#places.capitalize# #adjective#"]),
        ("places", PLACES.to_vec()),
        ("adjective", vec!["#modifiers# #adjectives#", "#superlatives#"]),
        ("modifiers", INTENSIFIERS.to_vec()),
        ("adjectives", ADJECTIVES.to_vec()),
        ("superlatives", SUPERLATIVES.to_vec()),
    ]
}
