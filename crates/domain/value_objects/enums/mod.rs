pub mod plan_request_statuses;
