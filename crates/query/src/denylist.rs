/// Generic common nouns that similarity search will happily match but
/// that are never human characters. Queries for these are rejected
/// before any retrieval or model call.
const DENYLIST: &[&str] = &[
    "school",
    "village",
    "town",
    "city",
    "river",
    "forest",
    "mountain",
    "valley",
    "sea",
    "ocean",
    "lake",
    "island",
    "castle",
    "palace",
    "house",
    "home",
    "garden",
    "farm",
    "market",
    "church",
    "temple",
    "bridge",
    "road",
    "tree",
    "flower",
    "stone",
    "sword",
    "ship",
    "boat",
    "horse",
    "dog",
    "cat",
    "bird",
    "wolf",
    "dragon",
    "story",
    "book",
    "night",
    "day",
    "winter",
    "summer",
];

/// Exact match against the denylist, after lowercasing the query.
pub fn is_denylisted(character_name: &str) -> bool {
    let lowered = character_name.to_lowercase();
    DENYLIST.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        assert!(is_denylisted("river"));
        assert!(is_denylisted("River"));
        assert!(is_denylisted("FOREST"));
    }

    #[test]
    fn names_pass_through() {
        assert!(!is_denylisted("Maya"));
        assert!(!is_denylisted("Riverton")); // exact match only, not substring
    }
}
