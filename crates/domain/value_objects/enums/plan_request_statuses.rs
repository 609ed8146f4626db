use std::{fmt::Display, str::FromStr};

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl PlanRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanRequestStatus::Pending => "Pending",
            PlanRequestStatus::Accepted => "Accepted",
            PlanRequestStatus::Rejected => "Rejected",
        }
    }
}

impl Display for PlanRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanRequestStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(PlanRequestStatus::Pending),
            "Accepted" => Ok(PlanRequestStatus::Accepted),
            "Rejected" => Ok(PlanRequestStatus::Rejected),
            other => Err(anyhow!("unknown plan request status: {other}")),
        }
    }
}
