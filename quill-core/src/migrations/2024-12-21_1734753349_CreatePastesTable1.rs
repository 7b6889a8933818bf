use crate::migration::SchemaMigration;

/// Initial pastes table and its public-timeline index.
pub struct CreatePastesTable1;

impl SchemaMigration for CreatePastesTable1 {
    fn forward_statements(&self) -> Vec<String> {
        vec![
            "CREATE TABLE pastes (
                id BIGSERIAL PRIMARY KEY,
                hash CHAR(8) NOT NULL UNIQUE,
                title VARCHAR(50),
                content TEXT NOT NULL,
                language VARCHAR(20) NOT NULL,
                is_public BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                expires_at TIMESTAMP NOT NULL DEFAULT '9999-12-31 23:59:59'
            )"
            .to_string(),
            "CREATE INDEX idx_paste_timeline ON pastes (is_public, created_at, expires_at)"
                .to_string(),
        ]
    }

    fn backward_statements(&self) -> Vec<String> {
        vec!["DROP TABLE IF EXISTS pastes".to_string()]
    }
}
