use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered owner or beneficiary managed by the association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub phone: String,
    pub email: String,
    pub standing: MemberStanding,
}

/// Payment standing shown next to each member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStanding {
    Active,
    Late,
}

impl MemberStanding {
    pub const fn label(self) -> &'static str {
        match self {
            MemberStanding::Active => "active",
            MemberStanding::Late => "late",
        }
    }
}

/// A building under the association's management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub city: String,
    pub units: u32,
    pub occupied: u32,
}

impl Building {
    pub fn occupancy_pct(&self) -> u32 {
        if self.units == 0 {
            return 0;
        }
        ((100.0 * self.occupied as f64) / self.units as f64).round() as u32
    }
}

/// Billing cadence of a fee template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Monthly,
    Quarterly,
    Yearly,
}

impl Periodicity {
    pub const fn label(self) -> &'static str {
        match self {
            Periodicity::Monthly => "monthly",
            Periodicity::Quarterly => "quarterly",
            Periodicity::Yearly => "yearly",
        }
    }
}

/// Reusable fee definition batch invoices are issued from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTemplate {
    pub id: String,
    pub title: String,
    pub periodicity: Periodicity,
    pub amount: u64,
    pub active: bool,
}

/// Notice published to the association's members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: NaiveDate,
    pub pinned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

/// Maintenance or operations work item on the association board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: String,
    pub title: String,
    pub assignee: Option<String>,
    pub status: TaskStatus,
}
