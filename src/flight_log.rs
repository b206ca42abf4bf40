use crate::telemetry::{TelemetryRecord, TelemetrySequence};

custom_error::custom_error! {pub IngestError
    MalformedInput { message: String } = "flight log is not readable as a table; {message}",
    EmptyResult = "no video observations found in flight log",
    FailedToRead { path: String, message: String } = "could not read flight log {path}; {message}",
}

#[derive(Debug, PartialEq, Clone)]
pub struct FlightLogFile {
    pub path: std::path::PathBuf,
}

impl FlightLogFile {
    pub fn new(path: std::path::PathBuf) -> Result<Self, IngestError> {
        if path.exists() {
            Ok(Self { path })
        } else {
            Err(IngestError::FailedToRead {
                path: path.to_string_lossy().to_string(),
                message: "path does not exist".to_string(),
            })
        }
    }

    pub fn read_telemetry(
        &self,
        columns: &crate::configuration::ColumnConfiguration,
    ) -> Result<TelemetrySequence, IngestError> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) => {
                return Err(IngestError::FailedToRead {
                    path: self.path.to_string_lossy().to_string(),
                    message: error.to_string(),
                });
            }
        };
        parse_flight_log(&contents, columns)
    }
}

/// Type a single cell the way a spreadsheet would: empty is null, `true`/`false` are booleans,
/// finite numbers are numbers, and everything else stays text.
pub fn typed_cell(cell: &str) -> serde_json::Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return serde_json::Value::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return serde_json::Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return serde_json::Value::Bool(false);
    }

    if let Ok(number) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(number) {
            return serde_json::Value::Number(number);
        }
    }

    serde_json::Value::String(cell.to_string())
}

fn number(value: Option<&serde_json::Value>) -> Option<f64> {
    value
        .and_then(|value| value.as_f64())
        .filter(|value| value.is_finite())
}

/// Parse the full flight log, in log order. Only the header row must be readable text; individual
/// bad cells, including ones that are not valid UTF-8, are not errors and simply leave the
/// corresponding field empty.
pub fn parse_flight_log(
    contents: &[u8],
    columns: &crate::configuration::ColumnConfiguration,
) -> Result<TelemetrySequence, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents);

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(|header| header.trim().to_string()).collect(),
        Err(error) => {
            return Err(IngestError::MalformedInput {
                message: error.to_string(),
            });
        }
    };
    if headers.iter().all(|header| header.is_empty()) {
        return Err(IngestError::MalformedInput {
            message: "no header row".to_string(),
        });
    }
    if headers.len() < 2 {
        return Err(IngestError::MalformedInput {
            message: format!("header row has only {:} field", headers.len()),
        });
    }
    if headers
        .iter()
        .any(|header| header.chars().any(|character| character.is_control()))
    {
        return Err(IngestError::MalformedInput {
            message: "header row contains control characters".to_string(),
        });
    }

    let mut records = vec![];
    for row in reader.byte_records() {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                return Err(IngestError::MalformedInput {
                    message: error.to_string(),
                });
            }
        };

        let mut cells = std::collections::BTreeMap::<String, serde_json::Value>::new();
        // undecodable bytes in a cell become replacement characters
        for (header, cell) in headers.iter().zip(row.iter()) {
            cells.insert(header.to_owned(), typed_cell(&String::from_utf8_lossy(cell)));
        }

        let video_phase = number(cells.get(&columns.video_phase)) == Some(1.0);
        let mut record = TelemetryRecord::new(
            video_phase,
            number(cells.get(&columns.latitude)),
            number(cells.get(&columns.longitude)),
            number(cells.get(&columns.ascent)),
            number(cells.get(&columns.heading)),
        );
        record.extra = cells
            .into_iter()
            .filter(|(header, _)| !columns.is_typed(header))
            .collect();

        records.push(record);
    }

    Ok(records)
}

/// Keep only records captured while the camera was recording. An empty result is an error, since
/// nothing downstream can be projected from it.
pub fn filter_video_observations(
    sequence: &[TelemetryRecord],
) -> Result<TelemetrySequence, IngestError> {
    let observations = crate::telemetry::video_phase(sequence);
    if observations.is_empty() {
        Err(IngestError::EmptyResult)
    } else {
        Ok(observations)
    }
}
