pub mod assessment;
pub mod colleges;
pub mod profile;
