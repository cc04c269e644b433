use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{AvailabilityStatus, College, CollegeCategory};
use crate::workflows::assessment::{AssessmentKind, AssessmentProfile};

/// Headline shown when no specialization result exists yet.
pub const INCOMPLETE_HEADLINE: &str = "Complete your assessments first";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeSort {
    #[default]
    Ranking,
    Fees,
    Availability,
    Rating,
    Placement,
}

impl CollegeSort {
    fn compare(self, left: &College, right: &College) -> Ordering {
        match self {
            Self::Ranking => left.ranking.cmp(&right.ranking),
            Self::Fees => left
                .fees_lakhs_per_year
                .total_cmp(&right.fees_lakhs_per_year),
            Self::Availability => right.available_seats.cmp(&left.available_seats),
            Self::Rating => right.rating.total_cmp(&left.rating),
            Self::Placement => right.placement_percent.total_cmp(&left.placement_percent),
        }
    }
}

impl FromStr for CollegeSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "ranking" => Ok(Self::Ranking),
            "fees" => Ok(Self::Fees),
            "availability" => Ok(Self::Availability),
            "rating" => Ok(Self::Rating),
            "placement" => Ok(Self::Placement),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Filters applied to one city's colleges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollegeQuery {
    pub city: String,
    pub text: Option<String>,
    pub category: Option<CollegeCategory>,
    pub sort: CollegeSort,
}

impl CollegeQuery {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: CollegeCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn sorted_by(mut self, sort: CollegeSort) -> Self {
        self.sort = sort;
        self
    }
}

/// A search hit with its availability bucket resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollegeMatch {
    pub college: College,
    pub availability: AvailabilityStatus,
    pub availability_label: &'static str,
}

pub(crate) fn search(colleges: &[College], query: &CollegeQuery) -> Vec<CollegeMatch> {
    let city = query.city.trim();
    let mut hits: Vec<&College> = colleges
        .iter()
        .filter(|college| college.city.eq_ignore_ascii_case(city))
        .filter(|college| {
            query
                .text
                .as_deref()
                .map_or(true, |text| college.matches_query(text))
        })
        .filter(|college| query.category.map_or(true, |wanted| college.category == wanted))
        .collect();

    hits.sort_by(|left, right| query.sort.compare(left, right));

    hits.into_iter()
        .map(|college| {
            let availability = college.availability();
            CollegeMatch {
                college: college.clone(),
                availability,
                availability_label: availability.label(),
            }
        })
        .collect()
}

/// Banner text on the college search screen, derived from stored assessment results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationHeadline {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
}

impl RecommendationHeadline {
    pub fn from_profile(profile: Option<&AssessmentProfile>) -> Self {
        match profile.and_then(|profile| {
            profile
                .primary_for(AssessmentKind::Specialization)
                .map(|specialization| (profile, specialization))
        }) {
            Some((profile, specialization)) => Self {
                headline: specialization.to_string(),
                stream: profile
                    .primary_for(AssessmentKind::Stream)
                    .map(str::to_string),
                degree: profile
                    .primary_for(AssessmentKind::Degree)
                    .map(str::to_string),
            },
            None => Self::incomplete(),
        }
    }

    pub fn incomplete() -> Self {
        Self {
            headline: INCOMPLETE_HEADLINE.to_string(),
            stream: None,
            degree: None,
        }
    }
}
