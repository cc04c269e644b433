use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cities offered by the college search picker. Only some have catalog entries.
pub const SUPPORTED_CITIES: [&str; 15] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Pune",
    "Hyderabad",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Gurgaon",
    "Noida",
    "Indore",
    "Bhopal",
    "Kochi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeCategory {
    Government,
    Private,
}

impl CollegeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Private => "Private",
        }
    }
}

impl fmt::Display for CollegeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CollegeCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "government" => Ok(Self::Government),
            "private" => Ok(Self::Private),
            other => Err(format!("unknown college type '{other}'")),
        }
    }
}

/// One institution in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub ranking: u32,
    pub cutoff: String,
    pub seats: u32,
    pub available_seats: u32,
    pub fees_lakhs_per_year: f64,
    pub category: CollegeCategory,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub placement_percent: f64,
    pub average_package_lakhs: f64,
    pub highest_package_lakhs: f64,
    pub established: u16,
    pub accreditation: String,
    pub campus_acres: u32,
}

impl College {
    pub fn availability(&self) -> AvailabilityStatus {
        AvailabilityStatus::from_seats(self.available_seats, self.seats)
    }

    /// Case-insensitive match against the name or any specialty.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&needle)
            || self
                .specialties
                .iter()
                .any(|specialty| specialty.to_lowercase().contains(&needle))
    }
}

/// Seat availability bucket shown next to each college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    High,
    Moderate,
    Limited,
    Waitlist,
}

impl AvailabilityStatus {
    pub fn from_seats(available: u32, total: u32) -> Self {
        if total == 0 || available == 0 {
            return Self::Waitlist;
        }

        // percentage thresholds compared without floating point
        let scaled = u64::from(available) * 100;
        let total = u64::from(total);
        if scaled > 50 * total {
            Self::High
        } else if scaled > 20 * total {
            Self::Moderate
        } else {
            Self::Limited
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Availability",
            Self::Moderate => "Moderate Availability",
            Self::Limited => "Limited Seats",
            Self::Waitlist => "Waitlist Only",
        }
    }
}
