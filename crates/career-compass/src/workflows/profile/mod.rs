//! Student profile snapshot and the completion meter shown on the profile screens.

use serde::{Deserialize, Serialize};

/// Fields a student fills in during profile setup. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<u8>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone_number: Option<String>,
    pub current_education_level: Option<String>,
    pub stream: Option<String>,
    pub school_college_name: Option<String>,
    pub tenth_percentage: Option<f64>,
    pub twelfth_percentage: Option<f64>,
    pub preferred_location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    CurrentEducationLevel,
    DateOfBirth,
    City,
    State,
    Stream,
    TenthPercentage,
    TwelfthPercentage,
    PreferredLocation,
}

impl ProfileField {
    pub const REQUIRED: [ProfileField; 2] = [Self::FullName, Self::CurrentEducationLevel];

    pub const OPTIONAL: [ProfileField; 7] = [
        Self::DateOfBirth,
        Self::City,
        Self::State,
        Self::Stream,
        Self::TenthPercentage,
        Self::TwelfthPercentage,
        Self::PreferredLocation,
    ];

    fn is_filled(self, profile: &StudentProfile) -> bool {
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .map_or(false, |value| !value.trim().is_empty())
        };
        // zero reads as unset, matching how the form stores blanks
        let number = |value: Option<f64>| value.map_or(false, |value| value != 0.0);

        match self {
            Self::FullName => text(&profile.full_name),
            Self::CurrentEducationLevel => text(&profile.current_education_level),
            Self::DateOfBirth => text(&profile.date_of_birth),
            Self::City => text(&profile.city),
            Self::State => text(&profile.state),
            Self::Stream => text(&profile.stream),
            Self::TenthPercentage => number(profile.tenth_percentage),
            Self::TwelfthPercentage => number(profile.twelfth_percentage),
            Self::PreferredLocation => text(&profile.preferred_location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletion {
    pub completion_percentage: u8,
    pub completed_required: usize,
    pub total_required: usize,
    pub completed_optional: usize,
    pub total_optional: usize,
    /// Required fields still blank. Optional gaps are not listed.
    pub missing_fields: Vec<ProfileField>,
}

impl ProfileCompletion {
    pub fn for_profile(profile: Option<&StudentProfile>) -> Self {
        let total_required = ProfileField::REQUIRED.len();
        let total_optional = ProfileField::OPTIONAL.len();

        let Some(profile) = profile else {
            return Self {
                completion_percentage: 0,
                completed_required: 0,
                total_required,
                completed_optional: 0,
                total_optional,
                missing_fields: Vec::new(),
            };
        };

        let missing_fields: Vec<ProfileField> = ProfileField::REQUIRED
            .into_iter()
            .filter(|field| !field.is_filled(profile))
            .collect();
        let completed_required = total_required - missing_fields.len();
        let completed_optional = ProfileField::OPTIONAL
            .into_iter()
            .filter(|field| field.is_filled(profile))
            .count();

        let total = total_required + total_optional;
        let completed = completed_required + completed_optional;
        let completion_percentage = ((200 * completed + total) / (2 * total)) as u8;

        Self {
            completion_percentage,
            completed_required,
            total_required,
            completed_optional,
            total_optional,
            missing_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_profile_reports_zero() {
        let completion = ProfileCompletion::for_profile(None);
        assert_eq!(completion.completion_percentage, 0);
        assert!(completion.missing_fields.is_empty());
        assert_eq!(completion.total_required, 2);
        assert_eq!(completion.total_optional, 7);
    }

    #[test]
    fn blank_profile_lists_required_fields() {
        let profile = StudentProfile {
            full_name: Some("   ".to_string()),
            ..StudentProfile::default()
        };

        let completion = ProfileCompletion::for_profile(Some(&profile));

        assert_eq!(completion.completion_percentage, 0);
        assert_eq!(
            completion.missing_fields,
            vec![ProfileField::FullName, ProfileField::CurrentEducationLevel]
        );
    }

    #[test]
    fn percentage_rounds_over_all_nine_fields() {
        let profile = StudentProfile {
            full_name: Some("Asha Rao".to_string()),
            city: Some("Pune".to_string()),
            tenth_percentage: Some(91.4),
            phone_number: Some("not counted".to_string()),
            ..StudentProfile::default()
        };

        let completion = ProfileCompletion::for_profile(Some(&profile));

        // 3 of 9
        assert_eq!(completion.completion_percentage, 33);
        assert_eq!(completion.completed_required, 1);
        assert_eq!(completion.completed_optional, 2);
        assert_eq!(
            completion.missing_fields,
            vec![ProfileField::CurrentEducationLevel]
        );
    }

    #[test]
    fn complete_profile_reaches_one_hundred() {
        let profile = StudentProfile {
            full_name: Some("Asha Rao".to_string()),
            date_of_birth: Some("2007-04-02".to_string()),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            current_education_level: Some("12th".to_string()),
            stream: Some("Science".to_string()),
            tenth_percentage: Some(91.4),
            twelfth_percentage: Some(88.0),
            preferred_location: Some("Bangalore".to_string()),
            ..StudentProfile::default()
        };

        let completion = ProfileCompletion::for_profile(Some(&profile));
        assert_eq!(completion.completion_percentage, 100);
        assert!(completion.missing_fields.is_empty());
    }

    #[test]
    fn deserializes_camel_case_payloads() {
        let profile: StudentProfile = serde_json::from_str(
            r#"{"fullName":"Asha","currentEducationLevel":"12th","tenthPercentage":90}"#,
        )
        .expect("payload");

        let completion = ProfileCompletion::for_profile(Some(&profile));
        // 3 of 9
        assert_eq!(completion.completion_percentage, 33);
    }
}
