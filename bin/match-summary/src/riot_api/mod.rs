pub mod mastery;
pub mod match_data;
