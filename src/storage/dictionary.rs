use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{AppError, PlaceField};
use crate::utils::category::{CategoryTable, CategoryTableFile};
use crate::utils::header::HeaderAliases;
use crate::utils::text::normalize_label;

pub const HEADER_ALIASES: &str = "header_aliases";
pub const CATEGORY_TABLE: &str = "category_table";

fn dictionary_file_name(name: &str) -> Option<&'static str> {
    match name {
        HEADER_ALIASES => Some("header_aliases.json"),
        CATEGORY_TABLE => Some("category_table.json"),
        _ => None,
    }
}

fn dictionary_path(dir: &Path, dictionary_name: &str) -> Result<PathBuf, AppError> {
    let file_name = dictionary_file_name(dictionary_name)
        .ok_or_else(|| AppError::config(format!("unknown dictionary: {dictionary_name}")))?;
    Ok(dir.join(file_name))
}

/// Raw dictionary JSON, `None` when the file has not been written yet
pub fn load_dictionary(dir: &Path, dictionary_name: &str) -> Result<Option<String>, AppError> {
    let file_path = dictionary_path(dir, dictionary_name)?;

    if !file_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&file_path)
        .map_err(|err| AppError::io(format!("failed to read dictionary {}: {err}", file_path.display())))?;

    Ok(Some(content))
}

/// Validate and store a dictionary under `dir`
pub fn save_dictionary(dir: &Path, dictionary_name: &str, content: &str) -> Result<(), AppError> {
    let file_path = dictionary_path(dir, dictionary_name)?;

    match dictionary_name {
        HEADER_ALIASES => {
            parse_header_aliases(content)?;
        }
        CATEGORY_TABLE => {
            let file = parse_category_table(content)?;
            let mut seen = HashSet::new();
            for rule in &file.keywords {
                for keyword in &rule.keywords {
                    let key = normalize_label(keyword);
                    if key.is_empty() {
                        continue;
                    }
                    if !seen.insert(key) {
                        return Err(AppError::config(format!(
                            "keyword '{}' is listed more than once",
                            keyword.trim()
                        )));
                    }
                }
            }
        }
        _ => {}
    }

    fs::create_dir_all(dir)
        .map_err(|err| AppError::io(format!("failed to create dictionary directory: {err}")))?;

    fs::write(&file_path, content)
        .map_err(|err| AppError::io(format!("failed to write dictionary {}: {err}", file_path.display())))?;

    tracing::info!(dictionary = dictionary_name, path = %file_path.display(), "saved dictionary");
    Ok(())
}

fn parse_header_aliases(content: &str) -> Result<HashMap<PlaceField, Vec<String>>, AppError> {
    serde_json::from_str(content)
        .map_err(|err| AppError::config(format!("invalid header alias dictionary: {err}")))
}

fn parse_category_table(content: &str) -> Result<CategoryTableFile, AppError> {
    serde_json::from_str(content)
        .map_err(|err| AppError::config(format!("invalid category dictionary: {err}")))
}

/// Header aliases from `dir` if a dictionary exists there, built-in defaults otherwise
pub fn load_header_aliases(dir: Option<&Path>) -> Result<HeaderAliases, AppError> {
    let content = match dir {
        Some(dir) => load_dictionary(dir, HEADER_ALIASES)?,
        None => None,
    };

    match content {
        Some(content) => Ok(HeaderAliases::from_table(parse_header_aliases(&content)?)),
        None => Ok(HeaderAliases::default()),
    }
}

/// Category table from `dir` if a dictionary exists there, built-in defaults otherwise
pub fn load_category_table(dir: Option<&Path>) -> Result<CategoryTable, AppError> {
    let content = match dir {
        Some(dir) => load_dictionary(dir, CATEGORY_TABLE)?,
        None => None,
    };

    match content {
        Some(content) => Ok(CategoryTable::from_file(parse_category_table(&content)?)),
        None => Ok(CategoryTable::default()),
    }
}
