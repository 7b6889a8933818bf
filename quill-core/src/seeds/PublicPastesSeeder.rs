use crate::db::SqlValue;
use crate::hash;
use crate::seed::{ColumnDef, DataType, Seeder};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Sample public pastes for a fresh development database.
pub struct PublicPastesSeeder;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "hash",
        data_type: DataType::Text,
    },
    ColumnDef {
        name: "title",
        data_type: DataType::Text,
    },
    ColumnDef {
        name: "content",
        data_type: DataType::Text,
    },
    ColumnDef {
        name: "language",
        data_type: DataType::Text,
    },
    ColumnDef {
        name: "is_public",
        data_type: DataType::Bool,
    },
    ColumnDef {
        name: "created_at",
        data_type: DataType::Timestamp,
    },
    ColumnDef {
        name: "expires_at",
        data_type: DataType::Timestamp,
    },
];

// (title, content, language)
const SAMPLE_SNIPPETS: &[(&str, &str, &str)] = &[
    (
        "Docker Compose Example",
        "version: '3.8'\n\nservices:\n  app:\n    build: ./app\n    ports:\n      - '8080:80'\n    volumes:\n      - ./app:/var/www/html",
        "yaml",
    ),
    (
        "SQL Query Example",
        "SELECT users.name, orders.total\nFROM users\nINNER JOIN orders ON users.id = orders.user_id\nWHERE orders.status = 'completed'\nORDER BY orders.total DESC\nLIMIT 10;",
        "sql",
    ),
    (
        "Git Commands Cheatsheet",
        "# Basic Git Commands\ngit init\ngit add .\ngit commit -m 'Initial commit'\ngit push origin main\n\n# Branching\ngit branch feature/new-feature\ngit checkout -b feature/new-feature",
        "markdown",
    ),
    (
        "HTML Template",
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <title>Sample Page</title>\n</head>\n<body>\n    <h1>Welcome</h1>\n    <p>This is a sample HTML template.</p>\n</body>\n</html>",
        "html",
    ),
    (
        "JavaScript Array Methods",
        "const numbers = [1, 2, 3, 4, 5];\n\nconst doubled = numbers.map(num => num * 2);\nconst evens = numbers.filter(num => num % 2 === 0);\nconst sum = numbers.reduce((acc, curr) => acc + curr, 0);\n\nconsole.log({ doubled, evens, sum });",
        "javascript",
    ),
    (
        "Rust Error Handling",
        "use std::fs;\n\nfn read_config(path: &str) -> std::io::Result<String> {\n    let contents = fs::read_to_string(path)?;\n    Ok(contents.trim().to_string())\n}",
        "rust",
    ),
    (
        "Hello World in Python",
        "print('Hello, World!')\n\n# This is a simple Python program\nname = input('Enter your name: ')\nprint(f'Hello, {name}!')",
        "python",
    ),
];

impl Seeder for PublicPastesSeeder {
    fn table_name(&self) -> &'static str {
        "pastes"
    }

    fn columns(&self) -> &'static [ColumnDef] {
        COLUMNS
    }

    fn create_rows(&self) -> Vec<Vec<SqlValue>> {
        let base_time = Local::now().naive_local();
        let never = never_expires();

        SAMPLE_SNIPPETS
            .iter()
            .enumerate()
            .map(|(index, (title, content, language))| {
                vec![
                    SqlValue::Text(hash::generate_hash_id()),
                    SqlValue::Text(title.to_string()),
                    SqlValue::Text(content.to_string()),
                    SqlValue::Text(language.to_string()),
                    SqlValue::Bool(true),
                    SqlValue::Timestamp(base_time + Duration::seconds(index as i64)),
                    SqlValue::Timestamp(never),
                ]
            })
            .collect()
    }
}

fn never_expires() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .expect("constant date is valid")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rows_are_ordered_by_creation_time() {
        let rows = PublicPastesSeeder.create_rows();
        assert_eq!(rows.len(), SAMPLE_SNIPPETS.len());

        let timestamps = rows
            .iter()
            .map(|row| match &row[5] {
                SqlValue::Timestamp(at) => *at,
                other => panic!("expected a timestamp, got {:?}", other),
            })
            .collect::<Vec<_>>();
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_every_row_gets_a_distinct_hash() {
        let rows = PublicPastesSeeder.create_rows();
        let mut hashes = rows
            .iter()
            .map(|row| match &row[0] {
                SqlValue::Text(hash) => hash.clone(),
                other => panic!("expected a text hash, got {:?}", other),
            })
            .collect::<Vec<_>>();
        hashes.sort();
        hashes.dedup();
        assert_eq!(hashes.len(), rows.len());
    }
}
