//! Parsers for `ps -a` output
//!
//! The listing has come in three shapes depending on runtime and version:
//! docker prints one JSON object per line, podman prints a single JSON
//! array, and runtimes without JSON support only give us a Go-template
//! text rendering. Field names and value types drift as well (`ID` vs `Id`,
//! names as a string or a list, labels as a map or a `k=v` string), so the
//! structured parsers accept every variant seen in the wild.

use crate::{ContainerId, ContainerRecord, ProviderError, Result, RuntimeKind};
use serde::Deserialize;
use std::collections::HashMap;

/// Go template used for the text fallback. Mounts go last so that any `|`
/// inside them cannot shift the other columns.
pub const DELIMITED_FORMAT: &str =
    "{{.ID}}|{{.Names}}|{{.Status}}|{{.Image}}|{{.Labels}}|{{.Mounts}}";

const DELIMITED_FIELDS: usize = 6;

/// How to read the runtime's container listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseParser {
    /// One JSON object per line
    JsonLines,
    /// A single JSON array of objects
    JsonArray,
    /// Pipe-delimited rows rendered from [`DELIMITED_FORMAT`]
    DelimitedText,
}

impl std::fmt::Display for ResponseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JsonLines => write!(f, "json-lines"),
            Self::JsonArray => write!(f, "json-array"),
            Self::DelimitedText => write!(f, "delimited-text"),
        }
    }
}

impl ResponseParser {
    /// The structured shape each runtime emits natively
    pub fn native(kind: RuntimeKind) -> Self {
        match kind {
            RuntimeKind::Podman => Self::JsonArray,
            RuntimeKind::Docker => Self::JsonLines,
        }
    }

    /// Pick a parser from the output of a successful `--format json` probe.
    ///
    /// Empty output is ambiguous: a host with no containers prints nothing
    /// whatever the runtime version. The runtime's native shape is assumed,
    /// which is wrong for a docker that predates `--format json` (it echoes
    /// the literal template, one `json` line per container).
    pub fn detect(output: &str, kind: RuntimeKind) -> Self {
        match output.trim_start().chars().next() {
            Some('[') => Self::JsonArray,
            Some('{') => Self::JsonLines,
            None => {
                let parser = Self::native(kind);
                tracing::debug!(
                    "Empty {} listing during probe, assuming {} output",
                    kind,
                    parser
                );
                parser
            }
            Some(_) => Self::DelimitedText,
        }
    }

    /// Value passed to `ps --format`
    pub fn format_arg(&self) -> &'static str {
        match self {
            Self::JsonLines | Self::JsonArray => "json",
            Self::DelimitedText => DELIMITED_FORMAT,
        }
    }

    /// Parse a complete listing. Any malformed entry fails the whole listing.
    pub fn parse(&self, output: &str) -> Result<Vec<ContainerRecord>> {
        match self {
            Self::JsonLines => parse_json_lines(output),
            Self::JsonArray => parse_json_array(output),
            Self::DelimitedText => parse_delimited(output),
        }
    }
}

/// A string or a list of strings; runtimes disagree on which they emit
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => split_list(&s),
            StringOrList::Many(v) => v
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "ID", alias = "Id")]
    id: Option<String>,
    #[serde(rename = "Names", default)]
    names: Option<StringOrList>,
    #[serde(rename = "Image", default)]
    image: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
    #[serde(rename = "State", default)]
    state: Option<serde_json::Value>,
    #[serde(rename = "Labels", default)]
    labels: Option<serde_json::Value>,
    #[serde(rename = "Mounts", default)]
    mounts: Option<StringOrList>,
}

impl RawRecord {
    fn into_record(self) -> Result<ContainerRecord> {
        let id = self.id.unwrap_or_default().trim().to_string();
        if id.is_empty() {
            return Err(ProviderError::MalformedResponse(
                "container entry without an ID".to_string(),
            ));
        }

        let names: Vec<String> = self
            .names
            .map(StringOrList::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|n| n.trim_start_matches('/').to_string())
            .collect();
        if names.first().map_or(true, |n| n.is_empty()) {
            return Err(ProviderError::MalformedResponse(format!(
                "container {} has no name",
                id
            )));
        }

        let status = self
            .status
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                self.state
                    .as_ref()
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string)
            })
            .unwrap_or_default();

        Ok(ContainerRecord {
            id: ContainerId::new(id),
            names,
            image: self.image.unwrap_or_default(),
            status,
            labels: self
                .labels
                .as_ref()
                .map(labels_from_json_value)
                .unwrap_or_default(),
            mounts: self.mounts.map(StringOrList::into_vec).unwrap_or_default(),
        })
    }
}

fn preview(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(200)
        .collect::<String>()
}

/// Parse JSON-lines output from `docker ps --format json`
fn parse_json_lines(output: &str) -> Result<Vec<ContainerRecord>> {
    let mut records = Vec::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let raw: RawRecord = serde_json::from_str(trimmed).map_err(|e| {
            ProviderError::MalformedResponse(format!(
                "line is not a JSON container object: {} (output preview: {:?})",
                e,
                preview(trimmed)
            ))
        })?;
        records.push(raw.into_record()?);
    }
    Ok(records)
}

/// Parse the JSON array printed by `podman ps --format json`
fn parse_json_array(output: &str) -> Result<Vec<ContainerRecord>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let raws: Vec<RawRecord> = serde_json::from_str(trimmed).map_err(|e| {
        ProviderError::MalformedResponse(format!(
            "output is not a JSON array of containers: {} (output preview: {:?})",
            e,
            preview(trimmed)
        ))
    })?;
    raws.into_iter().map(RawRecord::into_record).collect()
}

/// Parse rows rendered from [`DELIMITED_FORMAT`]. A leading header row and
/// blank lines (including the trailing one) are skipped.
fn parse_delimited(output: &str) -> Result<Vec<ContainerRecord>> {
    let mut records = Vec::new();
    let mut first_row = true;
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.splitn(DELIMITED_FIELDS, '|').collect();
        if first_row {
            first_row = false;
            let head = parts[0].trim();
            if head.eq_ignore_ascii_case("ID") || head.eq_ignore_ascii_case("CONTAINER ID") {
                continue;
            }
        }
        if parts.len() < DELIMITED_FIELDS {
            return Err(ProviderError::MalformedResponse(format!(
                "expected {} fields, found {} (output preview: {:?})",
                DELIMITED_FIELDS,
                parts.len(),
                preview(line)
            )));
        }

        let id = parts[0].trim();
        let names = split_list(parts[1]);
        if id.is_empty() || names.is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "row without ID or name (output preview: {:?})",
                preview(line)
            )));
        }

        records.push(ContainerRecord {
            id: ContainerId::new(id),
            names,
            status: parts[2].trim().to_string(),
            image: parts[3].trim().to_string(),
            labels: parse_cli_labels(parts[4].trim()),
            mounts: split_list(parts[5]),
        });
    }
    Ok(records)
}

/// Split a rendered list: `a,b`, or Go's `[a b]` slice rendering
fn split_list(s: &str) -> Vec<String> {
    let s = s.trim();
    let (body, separator): (&str, &[char]) = match s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) => (inner, &[' ', ',']),
        None => (s, &[',']),
    };
    body.split(separator)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn labels_from_json_value(value: &serde_json::Value) -> HashMap<String, String> {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let value = v
                    .as_str()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| v.to_string());
                (k.clone(), value)
            })
            .collect(),
        serde_json::Value::String(s) => parse_cli_labels(s),
        _ => HashMap::new(),
    }
}

/// Parse CLI labels: docker's "key=value,key2=value2" or podman's
/// "map[key:value key2:value2]"
fn parse_cli_labels(label_str: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    if let Some(inner) = label_str
        .strip_prefix("map[")
        .and_then(|r| r.strip_suffix(']'))
    {
        for part in inner.split_whitespace() {
            if let Some((key, value)) = part.split_once(':') {
                labels.insert(key.to_string(), value.to_string());
            }
        }
        return labels;
    }
    for part in label_str.split(',') {
        if let Some((key, value)) = part.split_once('=') {
            labels.insert(key.to_string(), value.to_string());
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCKER_LINES: &str = concat!(
        r#"{"Command":"\"/bin/sh\"","ID":"4b1e2f0c9d8a7b6c5d4e3f2a1b0c9d8e","Image":"registry.fedoraproject.org/fedora-toolbox:39","Labels":"manager=distrobox,com.github.containers.toolbox=true","Mounts":"/usr/bin/distrobox-export,/home/me","Names":"devbox","State":"running","Status":"Up 2 hours"}"#,
        "\n",
        r#"{"ID":"9f8e7d6c5b4a39281706f5e4d3c2b1a0","Image":"nginx:latest","Labels":"","Mounts":"","Names":"web","State":"exited","Status":"Exited (0) 3 days ago"}"#,
        "\n"
    );

    const PODMAN_ARRAY: &str = r#"[
  {
    "Id": "1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d",
    "Image": "quay.io/toolbx/ubuntu-toolbox:22.04",
    "Labels": {"manager": "distrobox", "com.github.containers.toolbox": "true"},
    "Mounts": ["/usr/bin/distrobox-export", "/run/host"],
    "Names": ["ubuntu-box", "ub"],
    "State": "running",
    "Status": "Up 5 minutes"
  },
  {
    "Id": "ffeeddccbbaa99887766554433221100",
    "Image": "docker.io/library/redis:7",
    "Labels": null,
    "Mounts": null,
    "Names": ["cache"],
    "State": "exited",
    "Status": ""
  }
]"#;

    // ==================== detection tests ====================

    #[test]
    fn test_detect_shapes() {
        assert_eq!(
            ResponseParser::detect(PODMAN_ARRAY, RuntimeKind::Podman),
            ResponseParser::JsonArray
        );
        assert_eq!(
            ResponseParser::detect(DOCKER_LINES, RuntimeKind::Docker),
            ResponseParser::JsonLines
        );
        assert_eq!(
            ResponseParser::detect("CONTAINER ID  IMAGE\n", RuntimeKind::Docker),
            ResponseParser::DelimitedText
        );
    }

    #[test]
    fn test_detect_empty_output_uses_native_shape() {
        assert_eq!(
            ResponseParser::detect("", RuntimeKind::Podman),
            ResponseParser::JsonArray
        );
        assert_eq!(
            ResponseParser::detect("\n", RuntimeKind::Docker),
            ResponseParser::JsonLines
        );
    }

    #[test]
    fn test_detect_literal_template_is_text() {
        // docker before 23 prints the format string itself for each container
        assert_eq!(
            ResponseParser::detect("json\njson\n", RuntimeKind::Docker),
            ResponseParser::DelimitedText
        );
    }

    #[test]
    fn test_format_arg() {
        assert_eq!(ResponseParser::JsonLines.format_arg(), "json");
        assert_eq!(ResponseParser::JsonArray.format_arg(), "json");
        assert_eq!(ResponseParser::DelimitedText.format_arg(), DELIMITED_FORMAT);
    }

    // ==================== JSON lines tests ====================

    #[test]
    fn test_parse_json_lines() {
        let records = ResponseParser::JsonLines.parse(DOCKER_LINES).unwrap();
        assert_eq!(records.len(), 2);

        let devbox = &records[0];
        assert_eq!(devbox.id.0, "4b1e2f0c9d8a7b6c5d4e3f2a1b0c9d8e");
        assert_eq!(devbox.name(), Some("devbox"));
        assert_eq!(devbox.status, "Up 2 hours");
        assert_eq!(devbox.image, "registry.fedoraproject.org/fedora-toolbox:39");
        assert_eq!(devbox.labels.get("manager").unwrap(), "distrobox");
        assert_eq!(
            devbox.mounts,
            vec!["/usr/bin/distrobox-export".to_string(), "/home/me".to_string()]
        );

        assert!(records[1].labels.is_empty());
        assert!(records[1].mounts.is_empty());
    }

    #[test]
    fn test_parse_json_lines_comma_separated_names() {
        let output = r#"{"ID":"abc","Names":"first,second","Image":"img","Status":"Up"}"#;
        let records = ResponseParser::JsonLines.parse(output).unwrap();
        assert_eq!(records[0].names, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_parse_json_lines_invalid_errors() {
        let output = format!("{}not-json\n", DOCKER_LINES);
        let err = ResponseParser::JsonLines.parse(&output).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
        assert!(err.to_string().contains("not-json"));
    }

    #[test]
    fn test_parse_json_lines_empty_output() {
        assert!(ResponseParser::JsonLines.parse("").unwrap().is_empty());
        assert!(ResponseParser::JsonLines.parse("\n\n").unwrap().is_empty());
    }

    // ==================== JSON array tests ====================

    #[test]
    fn test_parse_json_array() {
        let records = ResponseParser::JsonArray.parse(PODMAN_ARRAY).unwrap();
        assert_eq!(records.len(), 2);

        let ubuntu = &records[0];
        assert_eq!(ubuntu.id.0, "1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d");
        assert_eq!(ubuntu.name(), Some("ubuntu-box"));
        assert_eq!(ubuntu.names.len(), 2);
        assert_eq!(ubuntu.status, "Up 5 minutes");
        assert_eq!(ubuntu.labels.get("manager").unwrap(), "distrobox");
        assert_eq!(ubuntu.mounts[0], "/usr/bin/distrobox-export");

        // Empty Status falls back to State; null labels/mounts are empty
        let cache = &records[1];
        assert_eq!(cache.status, "exited");
        assert!(cache.labels.is_empty());
        assert!(cache.mounts.is_empty());
    }

    #[test]
    fn test_parse_json_array_empty() {
        assert!(ResponseParser::JsonArray.parse("[]").unwrap().is_empty());
        assert!(ResponseParser::JsonArray.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_array_rejects_lines() {
        let err = ResponseParser::JsonArray.parse(DOCKER_LINES).unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }

    #[test]
    fn test_parse_json_missing_name_errors() {
        let err = ResponseParser::JsonArray
            .parse(r#"[{"Id":"abc","Names":[],"Image":"img"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("has no name"));
    }

    #[test]
    fn test_parse_json_missing_id_errors() {
        let err = ResponseParser::JsonLines
            .parse(r#"{"Names":"x","Image":"img"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("without an ID"));
    }

    #[test]
    fn test_parse_json_non_string_label_values() {
        let output = r#"[{"Id":"abc","Names":["x"],"Labels":{"version":2,"manager":"distrobox"}}]"#;
        let records = ResponseParser::JsonArray.parse(output).unwrap();
        assert_eq!(records[0].labels.get("version").unwrap(), "2");
    }

    // ==================== delimited text tests ====================

    #[test]
    fn test_parse_delimited_with_header_and_trailing_blank() {
        let output = "ID|NAMES|STATUS|IMAGE|LABELS|MOUNTS\n\
                      abc123def4567890|devbox|Up 1 hour|fedora:39|manager=distrobox|/usr/bin/distrobox-export\n\
                      0987654321fedcba|web|Exited (0)|nginx||\n\
                      \n";
        let records = ResponseParser::DelimitedText.parse(output).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), Some("devbox"));
        assert_eq!(records[0].status, "Up 1 hour");
        assert_eq!(records[0].image, "fedora:39");
        assert_eq!(records[0].mounts, vec!["/usr/bin/distrobox-export".to_string()]);
        assert!(records[1].mounts.is_empty());
    }

    #[test]
    fn test_parse_delimited_podman_go_rendering() {
        let output =
            "abc|box|Up|img|map[manager:distrobox other:x]|[/usr/bin/distrobox-export /home]\n";
        let records = ResponseParser::DelimitedText.parse(output).unwrap();
        assert_eq!(records[0].labels.get("manager").unwrap(), "distrobox");
        assert_eq!(
            records[0].mounts,
            vec!["/usr/bin/distrobox-export".to_string(), "/home".to_string()]
        );
    }

    #[test]
    fn test_parse_delimited_too_few_fields_errors() {
        let err = ResponseParser::DelimitedText
            .parse("abc|name|status\n")
            .unwrap_err();
        assert!(err.to_string().contains("expected 6 fields"));
    }

    #[test]
    fn test_parse_delimited_pipe_inside_mounts() {
        let output = "abc|box|Up|img||/weird|path\n";
        let records = ResponseParser::DelimitedText.parse(output).unwrap();
        assert_eq!(records[0].mounts, vec!["/weird|path".to_string()]);
    }

    // ==================== parse_cli_labels tests ====================

    #[test]
    fn test_parse_cli_labels_basic() {
        let labels = parse_cli_labels("foo=bar,baz=qux");
        assert_eq!(labels.get("foo").unwrap(), "bar");
        assert_eq!(labels.get("baz").unwrap(), "qux");
    }

    #[test]
    fn test_parse_cli_labels_empty() {
        assert!(parse_cli_labels("").is_empty());
        assert!(parse_cli_labels("map[]").is_empty());
    }

    #[test]
    fn test_parse_cli_labels_value_with_equals() {
        let labels = parse_cli_labels("key=a=b,other=c");
        assert_eq!(labels.get("key").unwrap(), "a=b");
        assert_eq!(labels.get("other").unwrap(), "c");
    }
}
