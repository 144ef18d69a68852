//! The fixed universe of city datasets.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SelectorError;

/// One of the three city-specific trip datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case selector name, as typed by a user.
    pub fn key(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Title-case name used in rendered output.
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// CSV file holding this city's trips, relative to the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Whether the dataset carries `gender` and `birth_year` for its riders.
    pub fn has_demographics(&self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| SelectorError::UnknownCity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_case_insensitive() {
        assert_eq!("Chicago".parse::<City>(), Ok(City::Chicago));
        assert_eq!("NEW YORK CITY".parse::<City>(), Ok(City::NewYorkCity));
        assert_eq!(" washington ".parse::<City>(), Ok(City::Washington));
    }

    #[test]
    fn test_parse_unknown_city() {
        assert_eq!(
            "boston".parse::<City>(),
            Err(SelectorError::UnknownCity("boston".to_string()))
        );
    }

    #[test]
    fn test_demographics_gating() {
        assert!(City::Chicago.has_demographics());
        assert!(City::NewYorkCity.has_demographics());
        assert!(!City::Washington.has_demographics());
    }
}
