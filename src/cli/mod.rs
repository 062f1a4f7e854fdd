pub mod calendar;
pub mod day;
pub mod doctor;
pub mod export;
pub mod insight;
pub mod notes;
