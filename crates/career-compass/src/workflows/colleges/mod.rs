mod domain;
mod parser;
mod search;

use std::collections::BTreeSet;
use std::io::Read;

use tracing::debug;

pub use domain::{AvailabilityStatus, College, CollegeCategory, SUPPORTED_CITIES};
pub use search::{
    CollegeMatch, CollegeQuery, CollegeSort, RecommendationHeadline, INCOMPLETE_HEADLINE,
};

const EMBEDDED_CATALOG: &str = include_str!("catalog.csv");

#[derive(Debug)]
pub enum CatalogError {
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Csv(err) => write!(f, "invalid college catalog data: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Read-only directory of colleges searchable by city.
#[derive(Debug, Clone)]
pub struct CollegeCatalog {
    colleges: Vec<College>,
}

impl CollegeCatalog {
    /// Catalog compiled into the binary.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_reader(EMBEDDED_CATALOG.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let colleges = parser::parse_colleges(reader)?;
        debug!(colleges = colleges.len(), "college catalog loaded");
        Ok(Self { colleges })
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    /// Cities offered to the student, including ones without catalog entries.
    pub fn cities(&self) -> &'static [&'static str] {
        &SUPPORTED_CITIES
    }

    /// Cities with at least one college, alphabetically.
    pub fn covered_cities(&self) -> BTreeSet<&str> {
        self.colleges
            .iter()
            .map(|college| college.city.as_str())
            .collect()
    }

    /// Matches for one city. An unknown or uncovered city yields no matches.
    pub fn search(&self, query: &CollegeQuery) -> Vec<CollegeMatch> {
        search::search(&self.colleges, query)
    }
}
