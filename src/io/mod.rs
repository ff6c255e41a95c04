pub mod output;

pub use output::{
    create_writer, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter, TerminalWriter,
};

use crate::errors::RiskError;
use crate::risk::{RiskFactor, RiskFactorRecord};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and validate the risk factors in a `.json`, `.yaml`/`.yml` or
/// `.toml` file.
///
/// The document is either a bare list of records or a table with a
/// `factors` list.
pub fn load_factor_records(path: &Path) -> Result<Vec<RiskFactor>, RiskError> {
    let contents = fs::read_to_string(path)?;
    let records = parse_factor_document(path, &contents)?;

    let factors = records
        .into_iter()
        .map(RiskFactor::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Loaded {} risk factors from {}",
        factors.len(),
        path.display()
    );
    Ok(factors)
}

fn parse_factor_document(path: &Path, contents: &str) -> Result<Vec<RiskFactorRecord>, RiskError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let document: Value = match extension.as_deref() {
        Some("json") => {
            serde_json::from_str(contents).map_err(|e| RiskError::parse(path, e.to_string()))?
        }
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(contents).map_err(|e| RiskError::parse(path, e.to_string()))?
        }
        Some("toml") => {
            toml::from_str(contents).map_err(|e| RiskError::parse(path, e.to_string()))?
        }
        _ => {
            return Err(RiskError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    factor_entries(path, document)?
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_record(path, index, entry))
        .collect()
}

/// Pick the record list out of either accepted layout.
fn factor_entries(path: &Path, document: Value) -> Result<Vec<Value>, RiskError> {
    match document {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => Ok(entries),
        Value::Object(mut table) => match table.remove("factors") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(entries)) => Ok(entries),
            Some(_) => Err(RiskError::parse(path, "`factors` must be a list")),
        },
        _ => Err(RiskError::parse(
            path,
            "expected a list of factors or a table with a `factors` list",
        )),
    }
}

fn parse_record(path: &Path, index: usize, entry: Value) -> Result<RiskFactorRecord, RiskError> {
    let label = match entry.get("name").and_then(Value::as_str) {
        Some(name) => format!("factor '{}'", name),
        None => format!("factor #{}", index + 1),
    };

    serde_json::from_value(entry).map_err(|e| RiskError::parse(path, format!("{}: {}", label, e)))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), RiskError> {
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskCategory;
    use indoc::indoc;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json_list() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.json",
            r#"[{"name":"heparin_api","category":"quality","description":"Contamination history","probability":0.8,"impact":0.9,"controls":["lot testing"]}]"#,
        );

        let factors = load_factor_records(&path).unwrap();
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].name(), "heparin_api");
        assert_eq!(factors[0].controls(), &["lot testing".to_string()]);
    }

    #[test]
    fn test_load_yaml_table() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.yml",
            indoc! {"
                factors:
                  - name: cold_storage
                    category: supply_chain
                    description: Single refrigerated warehouse
                    probability: 0.4
                    impact: 0.9
                    mitigation_actions:
                      - qualify backup site
            "},
        );

        let factors = load_factor_records(&path).unwrap();
        assert_eq!(factors[0].category(), RiskCategory::SupplyChain);
        assert_eq!(factors[0].mitigation_actions().len(), 1);
    }

    #[test]
    fn test_load_toml_table() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.toml",
            indoc! {r#"
                [[factors]]
                name = "sterilizer_capacity"
                category = "safety"
                description = "EtO capacity constraints"
                probability = 0.3
                impact = 0.6
            "#},
        );

        let factors = load_factor_records(&path).unwrap();
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].impact(), 0.6);
    }

    #[test]
    fn test_invalid_record_is_rejected_with_name() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.json",
            r#"[{"name":"bad","category":"financial","description":"","probability":0.5,"impact":2.0}]"#,
        );

        let err = load_factor_records(&path).unwrap_err();
        assert!(matches!(err, RiskError::InvalidFactor(ref e) if e.name == "bad"));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "factors.csv", "name,probability");
        assert!(matches!(
            load_factor_records(&path).unwrap_err(),
            RiskError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn test_bad_record_error_names_factor_and_value() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.json",
            indoc! {r#"
                [
                  {"name": "ok", "category": "quality", "description": "", "probability": 0.1, "impact": 0.1},
                  {"name": "typo", "category": "qualty", "description": "", "probability": 0.1, "impact": 0.1}
                ]
            "#},
        );

        let message = load_factor_records(&path).unwrap_err().to_string();

        assert!(message.contains("factor 'typo'"), "{message}");
        assert!(message.contains("qualty"), "{message}");
        assert!(!message.contains("untagged"), "{message}");
    }

    #[test]
    fn test_unnamed_record_error_uses_position() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "factors.yaml",
            indoc! {"
                factors:
                  - category: safety
                    description: missing name
                    probability: 0.2
                    impact: 0.2
            "},
        );

        let message = load_factor_records(&path).unwrap_err().to_string();

        assert!(message.contains("factor #1"), "{message}");
        assert!(message.contains("name"), "{message}");
    }

    #[test]
    fn test_scalar_document_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "factors.json", "42");
        assert!(matches!(
            load_factor_records(&path).unwrap_err(),
            RiskError::Parse { .. }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "factors.json", "{not json");
        assert!(matches!(
            load_factor_records(&path).unwrap_err(),
            RiskError::Parse { .. }
        ));
    }
}
