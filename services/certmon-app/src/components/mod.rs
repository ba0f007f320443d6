//! Dashboard panels

pub mod certificates_table;
pub mod check_panel;
pub mod state_certs_table;
pub mod states_table;
pub mod validity_badge;
