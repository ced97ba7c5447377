//! Type-safe identifiers.
//!
//! Every resource gets its own UUID newtype so that a `CourseId` can never be passed
//! where a `CollegeId` is expected. On the wire they are plain hyphenated UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! resource_ids {
    ($($name:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Identifier of a " $name "."]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
                #[serde(transparent)]
                pub struct [<$name Id>](pub Uuid);

                impl [<$name Id>] {
                    pub fn new() -> Self {
                        Self(Uuid::new_v4())
                    }
                }

                impl Default for [<$name Id>] {
                    fn default() -> Self {
                        Self::new()
                    }
                }

                impl From<Uuid> for [<$name Id>] {
                    fn from(id: Uuid) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$name Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        self.0.fmt(f)
                    }
                }

                impl FromStr for [<$name Id>] {
                    type Err = uuid::Error;

                    fn from_str(s: &str) -> Result<Self, Self::Err> {
                        Uuid::parse_str(s.trim()).map(Self)
                    }
                }
            )*
        }
    };
}

resource_ids!(College, Course, Semester, Subject, Paper, Admin);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_and_display_as_uuid() {
        let id = CourseId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.parse::<CourseId>().unwrap(), id);
        assert!("not-an-id".parse::<CourseId>().is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = PaperId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
