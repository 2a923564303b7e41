//! Roster
//!
//! Owns the ordered set of people the user splits bills with.
//!
//! # Critical Invariants
//!
//! 1. **Id Uniqueness**: Each person id appears at most once
//! 2. **No Reissue**: An id issued in this session is never issued again,
//!    even after the person is removed
//! 3. **Stable Order**: Insertion order is preserved; balance updates keep
//!    the record in place

use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::ids::{IdGenerator, PersonId};
use crate::models::person::PersonRecord;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// How many times `add_person` redraws an id that was already issued
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Ordered collection of people
///
/// # Example
///
/// ```rust
/// use split_ledger_core::ids::SequentialIdGenerator;
/// use split_ledger_core::Roster;
///
/// let mut ids = SequentialIdGenerator::new("friend_");
/// let mut roster = Roster::new();
///
/// let clark = roster.add_person("Clark", "img", &mut ids).unwrap();
/// assert_eq!(clark.balance(), 0);
///
/// let updated = roster.apply_balance_delta(clark.id(), -7).unwrap();
/// assert_eq!(updated.balance(), -7);
/// assert_eq!(roster.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RosterRepr")]
pub struct Roster {
    /// People in insertion order
    people: Vec<PersonRecord>,

    /// Every id issued or seeded in this session, including removed ones
    #[serde(serialize_with = "serialize_issued")]
    issued: HashSet<PersonId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new person with balance 0
    ///
    /// # Errors
    ///
    /// * `EmptyName` / `EmptyAvatar` if either field is blank
    /// * `IdSpaceExhausted` if the generator keeps returning issued ids
    pub fn add_person(
        &mut self,
        name: &str,
        avatar_ref: &str,
        ids: &mut dyn IdGenerator,
    ) -> LedgerResult<PersonRecord> {
        self.add_person_tagged(name, avatar_ref, ids, false)
    }

    /// `add_person`, optionally storing the avatar as `"{avatar}?u={id}"`
    pub(crate) fn add_person_tagged(
        &mut self,
        name: &str,
        avatar_ref: &str,
        ids: &mut dyn IdGenerator,
        tag_avatar_with_id: bool,
    ) -> LedgerResult<PersonRecord> {
        let (name, avatar_ref) = validate_person_fields(name, avatar_ref)?;
        let id = self.fresh_id(ids)?;

        let avatar_ref = if tag_avatar_with_id {
            format!("{}?u={}", avatar_ref, id)
        } else {
            avatar_ref.to_string()
        };

        let person = PersonRecord::new(id, name, avatar_ref);
        self.push(person.clone());
        Ok(person)
    }

    /// Append an already-built record (roster seeding)
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` if the id was already issued
    /// * `EmptyName` / `EmptyAvatar` if either field is blank
    pub fn insert_seed(&mut self, person: PersonRecord) -> LedgerResult<()> {
        validate_person_fields(person.name(), person.avatar_ref())?;
        if self.issued.contains(person.id()) {
            return Err(LedgerError::InvalidConfig(format!(
                "Duplicate person id: {}",
                person.id()
            )));
        }
        self.push(person);
        Ok(())
    }

    /// Add `delta` to a person's balance, keeping their position
    ///
    /// # Errors
    ///
    /// * `NotFound` if no person has this id
    /// * `BalanceOverflow` if the new balance does not fit in i64
    pub fn apply_balance_delta(&mut self, id: &PersonId, delta: i64) -> LedgerResult<PersonRecord> {
        let person = self
            .people
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;

        person.apply_delta(delta)?;
        Ok(person.clone())
    }

    /// Remove a person
    ///
    /// The id stays issued. Clearing a selection that pointed at this person
    /// is the caller's job.
    pub fn remove(&mut self, id: &PersonId) -> LedgerResult<PersonRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        Ok(self.people.remove(index))
    }

    /// Remove every person (ids stay issued)
    pub fn clear(&mut self) {
        self.people.clear();
    }

    pub fn get(&self, id: &PersonId) -> Option<&PersonRecord> {
        self.people.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.get(id).is_some()
    }

    /// Index of a person in display order
    pub fn position(&self, id: &PersonId) -> Option<usize> {
        self.people.iter().position(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonRecord> {
        self.people.iter()
    }

    pub fn people(&self) -> &[PersonRecord] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Was this id ever issued in the session?
    pub fn was_issued(&self, id: &PersonId) -> bool {
        self.issued.contains(id)
    }

    /// The user's net position: sum of all balances
    ///
    /// Positive means the user is owed more than they owe.
    pub fn total_balance(&self) -> i64 {
        self.people.iter().map(|p| p.balance()).sum()
    }

    fn push(&mut self, person: PersonRecord) {
        self.issued.insert(person.id().clone());
        self.people.push(person);
    }

    fn fresh_id(&self, ids: &mut dyn IdGenerator) -> LedgerResult<PersonId> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = ids.next_id();
            if !self.issued.contains(&id) {
                return Ok(id);
            }
            tracing::warn!(%id, attempt, "id generator returned an issued id, redrawing");
        }
        Err(LedgerError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl PartialEq for Roster {
    /// Rosters are equal when they hold the same people in the same order
    fn eq(&self, other: &Self) -> bool {
        self.people == other.people
    }
}

impl Eq for Roster {}

/// Issued ids in sorted order so serialized rosters are deterministic
fn serialize_issued<S>(issued: &HashSet<PersonId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut ids: Vec<&PersonId> = issued.iter().collect();
    ids.sort();
    serializer.collect_seq(ids)
}

#[derive(Deserialize)]
struct RosterRepr {
    people: Vec<PersonRecord>,
    #[serde(default)]
    issued: Vec<PersonId>,
}

impl From<RosterRepr> for Roster {
    fn from(repr: RosterRepr) -> Self {
        // Current members count as issued even when the input omits them
        let mut issued: HashSet<PersonId> = repr.issued.into_iter().collect();
        issued.extend(repr.people.iter().map(|p| p.id().clone()));
        Self {
            people: repr.people,
            issued,
        }
    }
}

fn validate_person_fields<'a>(
    name: &'a str,
    avatar_ref: &'a str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let name = name.trim();
    let avatar_ref = avatar_ref.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if avatar_ref.is_empty() {
        return Err(ValidationError::EmptyAvatar);
    }
    Ok((name, avatar_ref))
}
