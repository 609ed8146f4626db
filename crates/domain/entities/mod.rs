pub mod plan_requests;
pub mod plans;
