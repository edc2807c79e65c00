//! City and country recognition against a built-in gazetteer

use log::{debug, info};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const UNKNOWN_PLACE: &str = "Unknown";

// Capitalised runs such as "London", "New York" or "Rio de Janeiro".
static PLACE_CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-ZÀ-Ú]+[a-zà-ú]+[ \-]?(?:d[a-u].)?(?:[A-ZÀ-Ú]+[a-zà-ú]+)*")
        .expect("Invalid place candidate regex")
});

static GAZETTEER: OnceCell<Gazetteer> = OnceCell::new();

const COUNTRIES: &str = include_str!("data/countries.txt");
const CITIES: &str = include_str!("data/cities.txt");

fn table_entries(table: &'static str) -> impl Iterator<Item = &'static str> {
    table
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: UNKNOWN_PLACE.to_string(),
            country: UNKNOWN_PLACE.to_string(),
        }
    }
}

impl Location {
    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN_PLACE && self.country == UNKNOWN_PLACE
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// Lowercased city and country names used for place recognition
#[derive(Debug, Clone)]
pub struct Gazetteer {
    cities: HashSet<String>,
    countries: HashSet<String>,
}

impl Gazetteer {
    pub fn builtin() -> Self {
        Self::with_extras(&[], &[])
    }

    pub fn with_extras(extra_cities: &[String], extra_countries: &[String]) -> Self {
        let cities = table_entries(CITIES)
            .map(str::to_string)
            .chain(extra_cities.iter().cloned())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let countries = table_entries(COUNTRIES)
            .map(str::to_string)
            .chain(extra_countries.iter().cloned())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Self { cities, countries }
    }

    pub fn is_city(&self, name: &str) -> bool {
        self.cities.contains(&name.to_lowercase())
    }

    pub fn is_country(&self, name: &str) -> bool {
        self.countries.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.cities.len() + self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First recognised city and first recognised country, as written in the text
    pub fn locate(&self, text: &str) -> Location {
        let mut city = None;
        let mut country = None;

        for candidate in PLACE_CANDIDATE_REGEX.find_iter(text) {
            let name = candidate.as_str().trim_matches(|c: char| c.is_whitespace() || c == '-');
            if city.is_none() && self.is_city(name) {
                city = Some(name.to_string());
            }
            if country.is_none() && self.is_country(name) {
                country = Some(name.to_string());
            }
            if city.is_some() && country.is_some() {
                break;
            }
        }

        debug!("Location heuristic: city={:?} country={:?}", city, country);
        Location {
            city: city.unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
            country: country.unwrap_or_else(|| UNKNOWN_PLACE.to_string()),
        }
    }
}

/// Install the process-wide gazetteer. Returns false if one was already in place.
pub fn init(extra_cities: &[String], extra_countries: &[String]) -> bool {
    let installed = GAZETTEER.set(Gazetteer::with_extras(extra_cities, extra_countries)).is_ok();
    if installed {
        info!(
            "Gazetteer ready ({} extra cities, {} extra countries)",
            extra_cities.len(),
            extra_countries.len()
        );
    }
    installed
}

/// The process-wide gazetteer, falling back to the built-in tables if `init` never ran
pub fn global() -> &'static Gazetteer {
    GAZETTEER.get_or_init(Gazetteer::builtin)
}

pub fn extract_location(text: &str) -> Location {
    global().locate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_city_and_country() {
        let location = extract_location("Jane Doe\nBased in London, United Kingdom. Previously Paris, France.");
        assert_eq!(location.city, "London");
        assert_eq!(location.country, "United Kingdom");
    }

    #[test]
    fn test_multi_word_city_names() {
        assert_eq!(extract_location("Office: New York").city, "New York");
        assert_eq!(extract_location("Moved to Rio de Janeiro in 2019").city, "Rio de Janeiro");
        assert_eq!(extract_location("Lives in São Paulo").city, "São Paulo");
    }

    #[test]
    fn test_no_place_names() {
        let location = extract_location("Senior backend engineer with Rust and Go");
        assert_eq!(location, Location::default());
        assert!(location.is_unknown());
    }

    #[test]
    fn test_country_without_city() {
        let location = extract_location("Open to relocation within Germany");
        assert_eq!(location.city, UNKNOWN_PLACE);
        assert_eq!(location.country, "Germany");
    }

    #[test]
    fn test_lowercase_mentions_are_not_candidates() {
        assert!(extract_location("london calling").is_unknown());
    }

    #[test]
    fn test_bundled_tables() {
        let gazetteer = Gazetteer::builtin();
        assert!(gazetteer.len() > 1000);
        assert!(gazetteer.is_city("Arlington"));
        assert!(gazetteer.is_city("gurgaon"));
        assert!(gazetteer.is_country("United Arab Emirates"));
        assert!(!gazetteer.is_city("# One city per line. Matching is case-insensitive."));
        assert!(!gazetteer.is_city("Tyler"));

        assert_eq!(extract_location("Tyler Brooks\nArlington, United States").city, "Arlington");
    }

    #[test]
    fn test_extra_entries() {
        let gazetteer = Gazetteer::with_extras(&["Gotham".to_string()], &["Wakanda".to_string()]);
        let location = gazetteer.locate("Gotham, Wakanda");
        assert_eq!(location.to_string(), "Gotham, Wakanda");
        assert!(!Gazetteer::builtin().is_city("Gotham"));
    }
}
