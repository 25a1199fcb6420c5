use std::collections::BTreeMap;
use thiserror::Error;

pub type MemberId = u32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Member name `{0}` must be non-empty and contain only letters")]
    InvalidName(String),
    #[error("Member name `{0}` is already in use")]
    NameTaken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// Lookup of the known participants, as seen by the splitter and the ledger.
pub trait Roster {
    fn member(&self, id: MemberId) -> Option<&Member>;

    /// Every known member id, in ascending order.
    fn member_ids(&self) -> Vec<MemberId>;

    fn member_count(&self) -> usize;

    fn contains(&self, id: MemberId) -> bool {
        self.member(id).is_some()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemberRegistry {
    members: BTreeMap<MemberId, Member>,
}

impl MemberRegistry {
    pub fn register(&mut self, name: &str) -> Result<MemberId, RegistryError> {
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.find_by_name(name).is_some() {
            return Err(RegistryError::NameTaken(name.to_string()));
        }

        let id = self.members.keys().next_back().map_or(1, |last| last + 1);
        self.members.insert(
            id,
            Member {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    /// Case insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        self.members
            .values()
            .find(|member| member.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }
}

impl Roster for MemberRegistry {
    fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    fn member_ids(&self) -> Vec<MemberId> {
        self.members.keys().copied().collect()
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// A valid, unique member name for `index`, used to build synthetic workloads.
pub fn synthetic_name(mut index: usize) -> String {
    let mut name = String::from("M");
    loop {
        name.push(char::from(b'a' + (index % 26) as u8));
        index /= 26;
        if index == 0 {
            return name;
        }
    }
}
