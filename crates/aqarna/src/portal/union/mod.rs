//! Association operations: members, buildings, fee templates,
//! announcements, and the maintenance board.
//!
//! The directory is a per-session working set; every mutation is a plain
//! synchronous edit, matching the single-session model of the portal.

pub mod domain;

pub use domain::{
    Announcement, Building, FeeTemplate, MaintenanceTask, Member, MemberStanding, Periodicity,
    TaskStatus,
};

use chrono::NaiveDate;

use crate::export::{csv_with_bom, ExportError};

/// Error raised by directory edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("member name and unit are required")]
    IncompleteMember,
    #[error("fee template needs a title and a positive amount")]
    InvalidFeeTemplate,
    #[error("announcement title is required")]
    MissingTitle,
    #[error("unknown id '{0}'")]
    UnknownId(String),
}

/// The association's working set for one session.
#[derive(Debug, Default)]
pub struct UnionDirectory {
    members: Vec<Member>,
    buildings: Vec<Building>,
    fees: Vec<FeeTemplate>,
    announcements: Vec<Announcement>,
    tasks: Vec<MaintenanceTask>,
    member_seq: u64,
    fee_seq: u64,
    announcement_seq: u64,
}

impl UnionDirectory {
    pub fn new(
        members: Vec<Member>,
        buildings: Vec<Building>,
        fees: Vec<FeeTemplate>,
        announcements: Vec<Announcement>,
        tasks: Vec<MaintenanceTask>,
    ) -> Self {
        let member_seq = next_suffix(members.iter().map(|m| m.id.as_str()), "M-", 1000);
        let fee_seq = next_suffix(fees.iter().map(|f| f.id.as_str()), "F-", 10);
        let announcement_seq =
            next_suffix(announcements.iter().map(|a| a.id.as_str()), "AN-", 100);

        Self {
            members,
            buildings,
            fees,
            announcements,
            tasks,
            member_seq,
            fee_seq,
            announcement_seq,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn fee_templates(&self) -> &[FeeTemplate] {
        &self.fees
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    /// Register a member in good standing. Name and unit are mandatory;
    /// contact details may trail in later.
    pub fn add_member(
        &mut self,
        name: &str,
        unit: &str,
        phone: &str,
        email: &str,
    ) -> Result<&Member, DirectoryError> {
        if name.trim().is_empty() || unit.trim().is_empty() {
            return Err(DirectoryError::IncompleteMember);
        }

        let id = format!("M-{}", self.member_seq);
        self.member_seq += 1;
        self.members.insert(
            0,
            Member {
                id,
                name: name.trim().to_string(),
                unit: unit.trim().to_string(),
                phone: phone.trim().to_string(),
                email: email.trim().to_string(),
                standing: MemberStanding::Active,
            },
        );
        Ok(&self.members[0])
    }

    /// Create a fee template, or update the one named by `id`.
    pub fn save_fee_template(
        &mut self,
        id: Option<&str>,
        title: &str,
        periodicity: Periodicity,
        amount: u64,
        active: bool,
    ) -> Result<&FeeTemplate, DirectoryError> {
        if title.trim().is_empty() || amount == 0 {
            return Err(DirectoryError::InvalidFeeTemplate);
        }

        match id {
            Some(id) => {
                let template = self
                    .fees
                    .iter_mut()
                    .find(|f| f.id == id)
                    .ok_or_else(|| DirectoryError::UnknownId(id.to_string()))?;
                template.title = title.trim().to_string();
                template.periodicity = periodicity;
                template.amount = amount;
                template.active = active;
                Ok(template)
            }
            None => {
                let id = format!("F-{:02}", self.fee_seq);
                self.fee_seq += 1;
                self.fees.insert(
                    0,
                    FeeTemplate {
                        id,
                        title: title.trim().to_string(),
                        periodicity,
                        amount,
                        active,
                    },
                );
                Ok(&self.fees[0])
            }
        }
    }

    pub fn publish_announcement(
        &mut self,
        title: &str,
        body: &str,
        date: NaiveDate,
    ) -> Result<&Announcement, DirectoryError> {
        if title.trim().is_empty() {
            return Err(DirectoryError::MissingTitle);
        }

        let id = format!("AN-{}", self.announcement_seq);
        self.announcement_seq += 1;
        self.announcements.insert(
            0,
            Announcement {
                id,
                title: title.trim().to_string(),
                body: body.trim().to_string(),
                date,
                pinned: false,
            },
        );
        Ok(&self.announcements[0])
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<bool, DirectoryError> {
        let announcement = self
            .announcements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DirectoryError::UnknownId(id.to_string()))?;
        announcement.pinned = !announcement.pinned;
        Ok(announcement.pinned)
    }

    pub fn delete_announcement(&mut self, id: &str) -> Result<(), DirectoryError> {
        let before = self.announcements.len();
        self.announcements.retain(|a| a.id != id);
        if self.announcements.len() == before {
            return Err(DirectoryError::UnknownId(id.to_string()));
        }
        Ok(())
    }

    /// Flip a task between done and open; anything in progress completes.
    pub fn toggle_task(&mut self, id: &str) -> Result<TaskStatus, DirectoryError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DirectoryError::UnknownId(id.to_string()))?;
        task.status = match task.status {
            TaskStatus::Done => TaskStatus::Open,
            TaskStatus::Open | TaskStatus::InProgress => TaskStatus::Done,
        };
        Ok(task.status)
    }

    pub fn members_matching(
        &self,
        query: &str,
        standing: Option<MemberStanding>,
    ) -> Vec<&Member> {
        let needle = query.trim().to_lowercase();
        self.members
            .iter()
            .filter(|m| {
                needle.is_empty()
                    || [&m.name, &m.unit, &m.phone, &m.email]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .filter(|m| standing.map_or(true, |wanted| m.standing == wanted))
            .collect()
    }

    pub fn buildings_matching(&self, query: &str) -> Vec<&Building> {
        let needle = query.trim().to_lowercase();
        self.buildings
            .iter()
            .filter(|b| {
                needle.is_empty()
                    || b.name.to_lowercase().contains(&needle)
                    || b.city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn fee_templates_matching(&self, query: &str) -> Vec<&FeeTemplate> {
        let needle = query.trim().to_lowercase();
        self.fees
            .iter()
            .filter(|f| needle.is_empty() || f.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn announcements_matching(&self, query: &str) -> Vec<&Announcement> {
        let needle = query.trim().to_lowercase();
        self.announcements
            .iter()
            .filter(|a| {
                needle.is_empty()
                    || a.title.to_lowercase().contains(&needle)
                    || a.body.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Export the filtered member roster.
    pub fn members_csv(
        &self,
        query: &str,
        standing: Option<MemberStanding>,
    ) -> Result<String, ExportError> {
        let headers = ["ID", "Name", "Unit", "Phone", "Email", "Status"];
        let rows: Vec<Vec<String>> = self
            .members_matching(query, standing)
            .into_iter()
            .map(|m| {
                vec![
                    m.id.clone(),
                    m.name.clone(),
                    m.unit.clone(),
                    m.phone.clone(),
                    m.email.clone(),
                    m.standing.label().to_string(),
                ]
            })
            .collect();
        csv_with_bom(&headers, &rows)
    }
}

/// Next free numeric suffix after the seeded ids, so generated ids never
/// collide with them.
fn next_suffix<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str, base: u64) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(base)
}
