//! Static reference data: supported states and their districts.
//!
//! These are the regions offered in the area-selection dropdowns. District
//! boundary geometry is *not* stored here; it is resolved at request time
//! from the administrative boundary dataset by exact name match.

/// Supported states with their district lists.
pub const STATES_DISTRICTS: &[(&str, &[&str])] = &[
    (
        "Punjab",
        &[
            "Amritsar",
            "Bathinda",
            "Ferozepur",
            "Gurdaspur",
            "Hoshiarpur",
            "Jalandhar",
            "Ludhiana",
            "Patiala",
            "Sangrur",
        ],
    ),
    (
        "Haryana",
        &[
            "Ambala",
            "Hisar",
            "Karnal",
            "Kurukshetra",
            "Panipat",
            "Rohtak",
            "Sirsa",
            "Sonipat",
            "Yamunanagar",
        ],
    ),
    (
        "Uttar Pradesh",
        &[
            "Agra",
            "Aligarh",
            "Bareilly",
            "Ghaziabad",
            "Kanpur",
            "Lucknow",
            "Meerut",
            "Varanasi",
        ],
    ),
    (
        "Delhi",
        &[
            "Central Delhi",
            "East Delhi",
            "New Delhi",
            "North Delhi",
            "South Delhi",
            "West Delhi",
        ],
    ),
];

/// All supported state names, in display order.
pub fn states() -> Vec<&'static str> {
    STATES_DISTRICTS.iter().map(|(state, _)| *state).collect()
}

/// Districts for a state, or `None` if the state is not supported.
pub fn districts_for(state: &str) -> Option<&'static [&'static str]> {
    STATES_DISTRICTS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, districts)| *districts)
}
