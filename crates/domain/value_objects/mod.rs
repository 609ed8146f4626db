pub mod coercion;
pub mod enums;
pub mod patch;
pub mod plan_requests;
pub mod plans;
