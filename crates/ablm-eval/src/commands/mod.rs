pub mod check_model;
pub mod per_position;
