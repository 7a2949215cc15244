use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MovieId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: String,
}

/// A movie that has passed field validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
}

impl NewMovie {
    /// Trims both fields and rejects either one being blank.
    pub fn parse(title: &str, director: &str) -> Result<Self, crate::error::ApiException> {
        use crate::error::{ApiException, ErrorCode};

        let title = title.trim();
        if title.is_empty() {
            return Err(ApiException::new(ErrorCode::Validation, "title is required"));
        }
        let director = director.trim();
        if director.is_empty() {
            return Err(ApiException::new(
                ErrorCode::Validation,
                "director is required",
            ));
        }
        Ok(Self {
            title: title.to_string(),
            director: director.to_string(),
        })
    }
}
