use crate::{PersistenceError, PersistenceResult};

/// A member as stored, with its identifier assigned by the database on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
}

/// A member that has not been persisted yet.
///
/// Constructed through [`NewMember::parse`], which enforces the name invariant
/// before the record ever reaches a session.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    name: String,
}

impl NewMember {
    pub fn parse(name: impl Into<String>) -> PersistenceResult<Self> {
        let name = name.into();
        match name.chars().count() {
            0 => Err(PersistenceError::InvalidMember(
                "Member name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(PersistenceError::InvalidMember(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self { name }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[test]
fn test_valid_member_names() {
    let valid_names = ["san-a".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed = NewMember::parse(valid_name.clone())
            .expect("Failed to parse valid member name");

        assert_eq!(parsed.name(), valid_name);
    }
}

#[test]
fn test_empty_member_name() {
    let result = NewMember::parse("");
    assert!(matches!(
        result,
        Err(PersistenceError::InvalidMember(msg)) if msg == "Member name cannot be empty"
    ));
}

#[test]
fn test_long_member_name() {
    let result = NewMember::parse("a".repeat(256));
    assert!(matches!(
        result,
        Err(PersistenceError::InvalidMember(msg)) if msg == "Max name length is 255 characters"
    ));
}
