use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid {entity}: {message}")]
    Validation { entity: &'static str, message: String },

    #[error("{entity} with {field} `{value}` already exists")]
    UniquenessViolation { entity: &'static str, field: &'static str, value: String },

    #[error("{entity} references missing {target} {id}")]
    ReferentialIntegrity { entity: &'static str, target: &'static str, id: i32 },

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl CatalogError {
    pub fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { entity, message: message.into() }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound { entity, key: key.to_string() }
    }

    /// Turns a unique-index failure into `UniquenessViolation`; any other
    /// database error passes through untouched.
    pub(crate) fn from_unique(
        err: DbErr,
        entity: &'static str,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::UniquenessViolation { entity, field, value: value.to_string() }
            }
            _ => Self::Database(err),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_record() {
        let err = CatalogError::UniquenessViolation {
            entity: "genre",
            field: "url",
            value: "drama".to_string(),
        };
        assert_eq!(err.to_string(), "genre with url `drama` already exists");

        let err = CatalogError::ReferentialIntegrity { entity: "rating", target: "movie", id: 7 };
        assert_eq!(err.to_string(), "rating references missing movie 7");

        assert_eq!(CatalogError::not_found("movie", "x").to_string(), "movie x not found");
    }

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = CatalogError::from_unique(DbErr::Custom("boom".into()), "movie", "url", "x");
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
