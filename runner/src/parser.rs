//! Streaming decode of the analyzer's JSON report and its stderr side channel.
//!
//! The report is shaped `{"files": [{path, offenses: [...]}, ...], ...}` with
//! surrounding keys (`metadata`, `summary`, ...) we have no use for. The parse
//! is a single pass driven by `serde_json::Deserializer`: the top-level object
//! and the `files` array are walked with hand-written visitors so each
//! [`FileResult`] is materialized one element at a time, and every unknown key
//! at any depth is skipped via [`IgnoredAny`]. The format is only loosely
//! specified, so absent scalars take documented defaults instead of failing
//! the run.

use std::fmt;
use std::io::{BufRead, Read};
use std::sync::Arc;

use serde::Deserialize;
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use rucop_types::{
    DEFAULT_COP, DEFAULT_MESSAGE, FileResult, Offense, OffenseLocation, RunReport, Severity,
};

use crate::error::ParseError;

/// Fixed prefix marking a capturable diagnostic on the side channel.
const WARNING_PREFIX: &str = "Warning: ";

/// Decode one report into per-file results, in emission order.
///
/// Single pass; the whole document is never materialized as a value tree.
/// `{}` and `{"files": []}` both decode to an empty vec.
pub fn parse_report<R: Read>(reader: R) -> Result<Vec<Arc<FileResult>>, ParseError> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    let files = ReportSeed.deserialize(&mut de)?;
    de.end()?;
    Ok(files)
}

/// Scan a fully drained side channel for `Warning: `-prefixed lines,
/// capturing the remainder of each. Non-matching lines contribute nothing;
/// an empty channel yields an empty vec.
pub fn extract_warnings<R: BufRead>(reader: R) -> Vec<String> {
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| line.strip_prefix(WARNING_PREFIX).map(ToString::to_string))
        .collect()
}

/// Decode a full run: the JSON report plus the side channel.
pub fn parse_run<R: Read, S: BufRead>(
    report: R,
    side_channel: S,
) -> Result<RunReport, ParseError> {
    let files = parse_report(report)?;
    let warnings = extract_warnings(side_channel);
    Ok(RunReport::new(files, warnings))
}

struct ReportSeed;

impl<'de> DeserializeSeed<'de> for ReportSeed {
    type Value = Vec<Arc<FileResult>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ReportVisitor)
    }
}

struct ReportVisitor;

impl<'de> Visitor<'de> for ReportVisitor {
    type Value = Vec<Arc<FileResult>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON report object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut files = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if key == "files" {
                files = map.next_value_seed(FilesSeed)?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(files)
    }
}

struct FilesSeed;

impl<'de> DeserializeSeed<'de> for FilesSeed {
    type Value = Vec<Arc<FileResult>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(FilesVisitor)
    }
}

struct FilesVisitor;

impl<'de> Visitor<'de> for FilesVisitor {
    type Value = Vec<Arc<FileResult>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of file entries")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut out = Vec::new();
        while let Some(raw) = seq.next_element::<RawFile>()? {
            out.push(Arc::new(raw.into_file_result()));
        }
        Ok(out)
    }
}

/// One `files` element as it appears on the wire. Buffered per element, not
/// per document.
#[derive(Deserialize)]
struct RawFile {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    offenses: Vec<RawOffense>,
}

impl RawFile {
    fn into_file_result(self) -> FileResult {
        let offenses = self
            .offenses
            .into_iter()
            .map(RawOffense::into_offense)
            .collect();
        FileResult::new(self.path.unwrap_or_default(), offenses)
    }
}

#[derive(Deserialize)]
struct RawOffense {
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    cop_name: Option<String>,
    #[serde(default)]
    location: Option<RawLocation>,
}

impl RawOffense {
    fn into_offense(self) -> Offense {
        let severity = self
            .severity
            .as_deref()
            .map_or(Severity::Unknown, Severity::from_report);
        let cop = self.cop_name.unwrap_or_else(|| DEFAULT_COP.to_string());
        let message = self.message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        let location = self.location.unwrap_or_default().into_location();
        Offense::new(severity, cop, message, location)
    }
}

#[derive(Deserialize, Default)]
struct RawLocation {
    #[serde(default, deserialize_with = "lenient_u32")]
    line: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    column: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    length: u32,
}

impl RawLocation {
    fn into_location(self) -> OffenseLocation {
        OffenseLocation::new(self.line, self.column, self.length)
    }
}

/// Accept integers given as numbers or as decimal strings — older tool
/// versions emitted `"length": "7"`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientU32;

    impl Visitor<'_> for LenientU32 {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an unsigned integer, possibly quoted")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<u32, E> {
            v.trim().parse().map_err(E::custom)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(LenientU32)
}
