//! Person graph.
//! Wraps one WikiTree profile (as returned by `getPerson`) and the nested
//! `Parents` / `Children` profiles, which are materialized as `Person` values
//! at decode time. Scalar accessors read the record verbatim and return `None`
//! when the field was not requested or not present.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Relatives keyed by their profile id.
pub type Relatives = BTreeMap<PersonId, Person>;

/// WikiTree profile id. The API sends these as numbers, but keys of the
/// `Parents`/`Children` objects are strings, so both decode to the same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// WikiTree uses `0` for "no parent recorded".
    pub fn is_set(&self) -> bool {
        !self.0.is_empty() && self.0 != "0"
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! person_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for PersonId {
            fn from(id: $t) -> Self {
                Self(id.to_string())
            }
        })*
    };
}

person_id_from_int!(i32, i64, u32, u64);

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => PersonId(n.to_string()),
            RawId::Float(n) => PersonId(n.to_string()),
            RawId::Text(s) => PersonId(s),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    id: Option<PersonId>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "FirstName", default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "LastNameAtBirth", default, skip_serializing_if = "Option::is_none")]
    last_name_at_birth: Option<String>,
    #[serde(rename = "RealName", default, skip_serializing_if = "Option::is_none")]
    real_name: Option<String>,
    #[serde(rename = "BirthName", default, skip_serializing_if = "Option::is_none")]
    birth_name: Option<String>,
    #[serde(rename = "BirthNamePrivate", default, skip_serializing_if = "Option::is_none")]
    birth_name_private: Option<String>,
    #[serde(rename = "Gender", default, skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(rename = "BirthDate", default, skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,
    #[serde(rename = "BirthLocation", default, skip_serializing_if = "Option::is_none")]
    birth_location: Option<String>,
    #[serde(rename = "DeathDate", default, skip_serializing_if = "Option::is_none")]
    death_date: Option<String>,
    #[serde(rename = "DeathLocation", default, skip_serializing_if = "Option::is_none")]
    death_location: Option<String>,
    #[serde(rename = "PhotoData", default, skip_serializing_if = "Option::is_none")]
    photo_data: Option<Value>,
    #[serde(rename = "Father", default, skip_serializing_if = "Option::is_none")]
    father: Option<PersonId>,
    #[serde(rename = "Mother", default, skip_serializing_if = "Option::is_none")]
    mother: Option<PersonId>,
    #[serde(
        rename = "Parents",
        default,
        deserialize_with = "deserialize_relatives",
        skip_serializing_if = "Option::is_none"
    )]
    parents: Option<Relatives>,
    #[serde(
        rename = "Children",
        default,
        deserialize_with = "deserialize_relatives",
        skip_serializing_if = "Option::is_none"
    )]
    children: Option<Relatives>,
    /// Any other requested profile fields, kept verbatim.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Accepts `{ "<id>": {...} }` as well as `[]`, which is how the API encodes
/// an empty collection.
fn deserialize_relatives<'de, D>(deserializer: D) -> Result<Option<Relatives>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRelatives {
        Keyed(BTreeMap<PersonId, Person>),
        Listed(Vec<Person>),
    }

    Ok(match Option::<RawRelatives>::deserialize(deserializer)? {
        None => None,
        Some(RawRelatives::Keyed(map)) => Some(map),
        Some(RawRelatives::Listed(list)) => Some(
            list.into_iter()
                .filter_map(|p| p.id.clone().map(|id| (id, p)))
                .collect(),
        ),
    })
}

impl Person {
    /// Builds a person graph from the `person` object of a `getPerson` result.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// A bare person carrying only an id, handy for wiring graphs by hand.
    pub fn with_id(id: impl Into<PersonId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<&PersonId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name_at_birth(&self) -> Option<&str> {
        self.last_name_at_birth.as_deref()
    }

    pub fn real_name(&self) -> Option<&str> {
        self.real_name.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    pub fn birth_location(&self) -> Option<&str> {
        self.birth_location.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.death_date.as_deref()
    }

    pub fn death_location(&self) -> Option<&str> {
        self.death_location.as_deref()
    }

    pub fn children(&self) -> Option<&Relatives> {
        self.children.as_ref()
    }

    pub fn parents(&self) -> Option<&Relatives> {
        self.parents.as_ref()
    }

    /// Raw `Father` field, whether or not the father's profile is cached.
    pub fn father_id(&self) -> Option<&PersonId> {
        self.father.as_ref()
    }

    /// Raw `Mother` field, whether or not the mother's profile is cached.
    pub fn mother_id(&self) -> Option<&PersonId> {
        self.mother.as_ref()
    }

    /// `BirthName`, falling back to `BirthNamePrivate` for privacy-limited profiles.
    pub fn display_name(&self) -> Option<&str> {
        self.birth_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.birth_name_private.as_deref())
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_data
            .as_ref()?
            .get("url")?
            .as_str()
            .filter(|url| !url.is_empty())
    }

    /// Any requested field, including ones without a dedicated accessor.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn father(&self) -> Option<&Person> {
        self.cached_parent(self.father.as_ref())
    }

    pub fn mother(&self) -> Option<&Person> {
        self.cached_parent(self.mother.as_ref())
    }

    fn cached_parent(&self, id: Option<&PersonId>) -> Option<&Person> {
        let id = id.filter(|id| id.is_set())?;
        self.parents.as_ref()?.get(id)
    }

    pub fn set_father(&mut self, person: Person) {
        Self::replace_parent(&mut self.father, &mut self.parents, person);
    }

    pub fn set_mother(&mut self, person: Person) {
        Self::replace_parent(&mut self.mother, &mut self.parents, person);
    }

    /// Stores `person` as the parent for one role and drops the previously
    /// cached parent for that role. The dropped entry is removed even if the
    /// same id is also stored for the other role.
    fn replace_parent(slot: &mut Option<PersonId>, parents: &mut Option<Relatives>, person: Person) {
        let Some(id) = person.id.clone() else {
            tracing::warn!("Ignoring parent without an Id");
            return;
        };
        let old_id = slot.replace(id.clone());

        let map = parents.get_or_insert_with(Relatives::new);
        if let Some(old_id) = old_id.filter(|old| old.is_set()) {
            map.remove(&old_id);
        }
        map.insert(id, person);
    }

    /// Replaces the children wholesale.
    pub fn set_children(&mut self, children: Relatives) {
        self.children = Some(children);
    }

    /// Walks cached parents breadth-first, yielding `(generation, person)`
    /// with parents at generation 1. Father comes before mother.
    pub fn ancestors(&self, max_depth: usize) -> Vec<(usize, &Person)> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([(0usize, self)]);

        while let Some((generation, person)) = queue.pop_front() {
            if generation >= max_depth {
                continue;
            }
            for parent in [person.father(), person.mother()].into_iter().flatten() {
                found.push((generation + 1, parent));
                queue.push_back((generation + 1, parent));
            }
        }
        found
    }
}
