use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PapirunError {
    #[error("Report directory {path} could not be created: {source}")]
    ReportDirCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Report directory not found at {path}")]
    ReportDirNotFound { path: PathBuf },

    #[error("No report file found in {path}. Did the benchmark write its PAPI output there?")]
    NoReportFound { path: PathBuf },

    #[error("Failed to read report file {path}: {source}")]
    ReportReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse report file {path}: {detail}")]
    ReportParseError { path: PathBuf, detail: String },

    #[error("Report is missing expected field '{field}'")]
    MissingField { field: String },

    #[error("Counter '{counter}' has non-numeric value '{value}'")]
    CounterNotNumeric { counter: String, value: String },

    #[error("Failed to spawn benchmark command '{command}': {source}")]
    BenchmarkSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Failed to write CSV output {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
