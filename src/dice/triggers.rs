//! Explosion trigger sets
//!
//! A trigger set names the faces that make a die roll again. Only the top
//! three faces of a d10 may explode.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{DiceError, Face};

/// Faces allowed in a trigger set
pub const EXPLODABLE: [Face; 3] = [8, 9, 10];

/// Set of faces that cause a die to explode
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Face>", into = "Vec<Face>")]
pub struct Triggers {
    faces: BTreeSet<Face>,
}

impl Triggers {
    /// Build a trigger set, rejecting faces outside 8..=10.
    /// Duplicates collapse.
    pub fn new(faces: impl IntoIterator<Item = Face>) -> Result<Self, DiceError> {
        let mut set = BTreeSet::new();
        for face in faces {
            if !EXPLODABLE.contains(&face) {
                return Err(DiceError::InvalidTrigger(face));
            }
            set.insert(face);
        }
        Ok(Self { faces: set })
    }

    /// No explosions
    pub fn none() -> Self {
        Self::default()
    }

    /// 8, 9 and 10 all explode
    pub fn all() -> Self {
        Self {
            faces: EXPLODABLE.into_iter().collect(),
        }
    }

    /// Check whether a face explodes
    pub fn contains(&self, face: Face) -> bool {
        self.faces.contains(&face)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Faces in descending order, the order used for display
    pub fn descending(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces.iter().rev().copied()
    }
}

impl TryFrom<Vec<Face>> for Triggers {
    type Error = DiceError;

    fn try_from(faces: Vec<Face>) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl From<Triggers> for Vec<Face> {
    fn from(triggers: Triggers) -> Self {
        triggers.descending().collect()
    }
}

/// Renders as `10,9,8`, or `-` when empty
impl std::fmt::Display for Triggers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let joined = self
            .descending()
            .map(|face| face.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_descending() {
        let triggers = Triggers::new([8, 10, 9]).unwrap();
        assert_eq!(triggers.to_string(), "10,9,8");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(Triggers::none().to_string(), "-");
    }

    #[test]
    fn test_display_single() {
        assert_eq!(Triggers::new([10]).unwrap().to_string(), "10");
        assert_eq!(Triggers::new([9, 8]).unwrap().to_string(), "9,8");
    }

    #[test]
    fn test_duplicates_collapse() {
        let triggers = Triggers::new([10, 10, 9]).unwrap();
        assert_eq!(triggers.len(), 2);
        assert!(triggers.contains(10));
        assert!(triggers.contains(9));
        assert!(!triggers.contains(8));
    }

    #[test]
    fn test_rejects_low_faces() {
        assert_eq!(Triggers::new([7]), Err(DiceError::InvalidTrigger(7)));
        assert_eq!(Triggers::new([10, 11]), Err(DiceError::InvalidTrigger(11)));
        assert_eq!(Triggers::new([0]), Err(DiceError::InvalidTrigger(0)));
    }

    #[test]
    fn test_all() {
        assert_eq!(Triggers::all(), Triggers::new([8, 9, 10]).unwrap());
        assert_eq!(Triggers::all().to_string(), "10,9,8");
    }

    #[test]
    fn test_serde_list() {
        let triggers: Triggers = serde_json::from_str("[9, 10]").unwrap();
        assert_eq!(triggers.to_string(), "10,9");
        assert_eq!(serde_json::to_string(&triggers).unwrap(), "[10,9]");
        assert!(serde_json::from_str::<Triggers>("[6]").is_err());
    }
}
