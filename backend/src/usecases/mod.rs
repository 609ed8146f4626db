pub mod plan_requests;
