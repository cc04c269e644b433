use super::domain::{College, CollegeCategory};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_colleges<R: Read>(reader: R) -> Result<Vec<College>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut colleges = Vec::new();

    for record in csv_reader.deserialize::<CollegeRow>() {
        colleges.push(record?.into_college());
    }

    Ok(colleges)
}

#[derive(Debug, Deserialize)]
struct CollegeRow {
    id: u32,
    name: String,
    city: String,
    ranking: u32,
    cutoff: String,
    seats: u32,
    available_seats: u32,
    fees_lakhs_per_year: f64,
    #[serde(deserialize_with = "category_from_str")]
    category: CollegeCategory,
    #[serde(deserialize_with = "semicolon_list")]
    specialties: Vec<String>,
    rating: f64,
    placement_percent: f64,
    average_package_lakhs: f64,
    highest_package_lakhs: f64,
    established: u16,
    accreditation: String,
    campus_acres: u32,
}

impl CollegeRow {
    fn into_college(self) -> College {
        College {
            id: self.id,
            name: self.name,
            city: self.city,
            ranking: self.ranking,
            cutoff: self.cutoff,
            seats: self.seats,
            // a row never advertises more free seats than it has
            available_seats: self.available_seats.min(self.seats),
            fees_lakhs_per_year: self.fees_lakhs_per_year,
            category: self.category,
            specialties: self.specialties,
            rating: self.rating,
            placement_percent: self.placement_percent,
            average_package_lakhs: self.average_package_lakhs,
            highest_package_lakhs: self.highest_package_lakhs,
            established: self.established,
            accreditation: self.accreditation,
            campus_acres: self.campus_acres,
        }
    }
}

fn category_from_str<'de, D>(deserializer: D) -> Result<CollegeCategory, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn semicolon_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,name,city,ranking,cutoff,seats,available_seats,fees_lakhs_per_year,category,specialties,rating,placement_percent,average_package_lakhs,highest_package_lakhs,established,accreditation,campus_acres\n";

    #[test]
    fn parses_rows_and_splits_specialties() {
        let csv = format!(
            "{HEADER}7, Test Institute ,Pune,4,90%+,100,10,1.5,Private,Robotics; Data Science ;,4.0,80,5.5,12,2001,NAAC A,12\n"
        );

        let colleges = parse_colleges(Cursor::new(csv)).expect("parse");

        assert_eq!(colleges.len(), 1);
        let college = &colleges[0];
        assert_eq!(college.name, "Test Institute");
        assert_eq!(college.category, CollegeCategory::Private);
        assert_eq!(college.specialties, vec!["Robotics", "Data Science"]);
    }

    #[test]
    fn rejects_unknown_category() {
        let csv = format!(
            "{HEADER}1,Somewhere,Pune,4,90%+,100,10,1.5,charter,Robotics,4.0,80,5.5,12,2001,NAAC A,12\n"
        );

        assert!(parse_colleges(Cursor::new(csv)).is_err());
    }

    #[test]
    fn clamps_available_seats_to_capacity() {
        let csv = format!(
            "{HEADER}1,Somewhere,Pune,4,90%+,100,140,1.5,government,Robotics,4.0,80,5.5,12,2001,NAAC A,12\n"
        );

        let colleges = parse_colleges(Cursor::new(csv)).expect("parse");
        assert_eq!(colleges[0].available_seats, 100);
    }
}
