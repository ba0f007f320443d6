//! BDD step definitions for the certmon dashboard

pub mod check_steps;
pub mod loading_steps;
pub mod report_steps;
