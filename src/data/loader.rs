use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use super::model::{CellValue, Row};
use super::store::ExperimentDraft;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an experiment from a JSON file, keeping at most `max_rows` rows.
///
/// Two layouts are accepted:
///
/// ```json
/// [ { "t": 0, "v": 1.0 }, { "t": 1, "v": 2.0 } ]
/// ```
///
/// ```json
/// { "name": "Run 4", "description": "...", "tags": ["lab"], "rows": [ ... ] }
/// ```
///
/// The experiment is named after the file stem unless the file says otherwise.
pub fn load_file(path: &Path, max_rows: usize) -> Result<ExperimentDraft, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "json" {
        return Err(DataError::UnsupportedFormat { extension: ext });
    }

    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("experiment")
        .to_string();
    let mut draft = parse_experiment(root, stem)?;

    if draft.rows.len() > max_rows {
        log::warn!(
            "{} has {} rows, keeping the first {max_rows}",
            path.display(),
            draft.rows.len()
        );
        draft.rows.truncate(max_rows);
    }
    Ok(draft)
}

fn parse_experiment(root: JsonValue, default_name: String) -> Result<ExperimentDraft, DataError> {
    match root {
        JsonValue::Array(records) => Ok(ExperimentDraft {
            name: default_name,
            rows: parse_rows(records)?,
            ..ExperimentDraft::default()
        }),
        JsonValue::Object(mut obj) => {
            let records = match obj.remove("rows") {
                Some(JsonValue::Array(records)) => records,
                _ => {
                    return Err(DataError::InvalidLayout(
                        "expected a 'rows' array".to_string(),
                    ))
                }
            };
            let name = match obj.get("name") {
                Some(JsonValue::String(s)) if !s.trim().is_empty() => s.clone(),
                _ => default_name,
            };
            let description = obj
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let tags = obj
                .get("tags")
                .and_then(|v| v.as_array())
                .map(|tags| {
                    tags.iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            Ok(ExperimentDraft {
                name,
                description,
                tags,
                rows: parse_rows(records)?,
            })
        }
        _ => Err(DataError::InvalidLayout(
            "expected a JSON array or object at the top level".to_string(),
        )),
    }
}

fn parse_rows(records: Vec<JsonValue>) -> Result<Vec<Row>, DataError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| match rec {
            JsonValue::Object(obj) => Ok(json_to_row(obj)),
            _ => Err(DataError::InvalidLayout(format!(
                "row {i} is not a JSON object"
            ))),
        })
        .collect()
}

fn json_to_row(obj: Map<String, JsonValue>) -> Row {
    obj.into_iter()
        .map(|(key, val)| (key, json_to_cell(val)))
        .collect()
}

/// Only JSON numbers become numeric cells; booleans stay text.
fn json_to_cell(val: JsonValue) -> CellValue {
    match val {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) => CellValue::Text(s),
        JsonValue::Null => CellValue::Absent,
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Sample generator (upload stand-in)
// ---------------------------------------------------------------------------

/// SplitMix64 stream seeded from the file name.
struct Noise(u64);

impl Noise {
    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        ((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean normal noise (Box-Muller).
    fn jitter(&mut self, std_dev: f64) -> f64 {
        let radius = (-2.0 * self.unit().max(1e-12).ln()).sqrt();
        std_dev * radius * (std::f64::consts::TAU * self.unit()).cos()
    }
}

/// FNV-1a, stable across platforms and toolchains.
fn seed_from_name(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Fabricate `row_count` plausible measurement rows for an uploaded file.
///
/// The file's bytes are never read: the rows depend only on `file_name`, so
/// uploading the same name twice yields the same table.
pub fn fabricate_rows(file_name: &str, row_count: usize) -> Vec<Row> {
    let mut noise = Noise(seed_from_name(file_name));
    let base_temp = 18.0 + noise.unit() * 10.0;
    let drift = 0.02 + noise.unit() * 0.1;
    let target_yield = 60.0 + noise.unit() * 30.0;

    (0..row_count)
        .map(|i| {
            let t = i as f64;
            let progress = 1.0 - (-t / 12.0).exp();
            Row::from([
                ("time".to_string(), CellValue::Number(t)),
                (
                    "temperature".to_string(),
                    CellValue::Number(base_temp + drift * t + noise.jitter(0.4)),
                ),
                (
                    "pressure".to_string(),
                    CellValue::Number(101.3 + noise.jitter(0.8)),
                ),
                (
                    "yield".to_string(),
                    CellValue::Number(target_yield * progress + noise.jitter(1.5)),
                ),
                ("batch".to_string(), CellValue::Text(format!("B{}", i / 10 + 1))),
            ])
        })
        .collect()
}

/// Build an experiment draft for an "uploaded" file from [`fabricate_rows`].
pub fn sample_draft(file_name: &str, row_count: usize) -> ExperimentDraft {
    let name = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(file_name)
        .to_string();
    ExperimentDraft {
        name,
        description: format!("Sample data generated for {file_name}"),
        tags: vec!["sample".to_string()],
        rows: fabricate_rows(file_name, row_count),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::cell;

    fn write_json(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("run_a")
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_record_array_named_after_file() {
        let file = write_json(r#"[{"t":0,"v":1.5,"ok":true},{"t":1,"v":null,"note":"x"}]"#);
        let draft = load_file(file.path(), 100).unwrap();

        assert!(draft.name.starts_with("run_a"));
        assert_eq!(draft.rows.len(), 2);
        let keys: Vec<_> = draft.rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["t", "v", "ok"]);
        assert_eq!(cell(&draft.rows[0], "v"), &CellValue::Number(1.5));
        assert_eq!(cell(&draft.rows[0], "ok"), &CellValue::from("true"));
        assert!(cell(&draft.rows[1], "v").is_absent());
        assert_eq!(cell(&draft.rows[1], "note"), &CellValue::from("x"));
    }

    #[test]
    fn loads_object_layout_with_metadata() {
        let file = write_json(
            r#"{"name":"Run 4","description":"cold start","tags":["lab",3],"rows":[{"v":2}]}"#,
        );
        let draft = load_file(file.path(), 100).unwrap();
        assert_eq!(draft.name, "Run 4");
        assert_eq!(draft.description, "cold start");
        assert_eq!(draft.tags, vec!["lab".to_string()]);
        assert_eq!(cell(&draft.rows[0], "v"), &CellValue::Number(2.0));
    }

    #[test]
    fn truncates_to_row_cap() {
        let file = write_json(r#"[{"v":1},{"v":2},{"v":3}]"#);
        let draft = load_file(file.path(), 2).unwrap();
        assert_eq!(draft.rows.len(), 2);
    }

    #[test]
    fn rejects_bad_layouts() {
        let file = write_json(r#"[{"v":1}, 5]"#);
        assert!(matches!(
            load_file(file.path(), 10),
            Err(DataError::InvalidLayout(_))
        ));

        let file = write_json(r#"{"name":"no rows"}"#);
        assert!(matches!(
            load_file(file.path(), 10),
            Err(DataError::InvalidLayout(_))
        ));

        let file = write_json("not json");
        assert!(matches!(load_file(file.path(), 10), Err(DataError::Json(_))));
    }

    #[test]
    fn rejects_other_extensions() {
        let err = load_file(Path::new("measurements.xlsx"), 10).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat { ref extension } if extension == "xlsx"));
    }

    #[test]
    fn fabricated_rows_are_deterministic_per_name() {
        let a = fabricate_rows("run_a.csv", 25);
        let b = fabricate_rows("run_a.csv", 25);
        let c = fabricate_rows("run_b.csv", 25);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 25);
        assert_eq!(cell(&a[24], "time"), &CellValue::Number(24.0));
        assert_eq!(cell(&a[24], "batch"), &CellValue::from("B3"));
        assert!(cell(&a[3], "temperature").is_number());
    }

    #[test]
    fn sample_draft_uses_file_stem() {
        let draft = sample_draft("reactor_7.xlsx", 3);
        assert_eq!(draft.name, "reactor_7");
        assert_eq!(draft.rows.len(), 3);
        assert_eq!(draft.tags, vec!["sample".to_string()]);
    }
}
