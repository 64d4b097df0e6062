//! Loads report files from the data directory.
//!
//! The data directory is laid out as:
//!
//! ```text
//! <data>/election-finance/ef-<name>.json
//! <data>/politicians/<politician_id>.json
//! <data>/uniformed/<politician_id>.json
//! ```
//!
//! Files are read on every request so that reports can be updated without
//! restarting the server.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::{
    Error, election_finance::EfData, politician_report::AccountingReports,
};

const ELECTION_FINANCE_DIR: &str = "election-finance";
const ELECTION_FINANCE_PREFIX: &str = "ef-";
const JSON_EXTENSION: &str = ".json";

/// Which set of politician accounting reports to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// The reports as published.
    Standard,
    /// The reports converted to a uniform format.
    Uniformed,
}

impl ReportKind {
    fn directory(self) -> &'static str {
        match self {
            ReportKind::Standard => "politicians",
            ReportKind::Uniformed => "uniformed",
        }
    }
}

/// One year of a politician's reports, for listing on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportListing {
    /// The file stem of the politician's report file.
    pub politician_id: String,
    /// The year the report covers.
    pub year: i32,
    /// The politician's name.
    pub name: String,
}

/// Reads report files from a directory.
#[derive(Debug, Clone)]
pub struct DataSource {
    data_dir: PathBuf,
}

impl DataSource {
    /// Read reports from the directory `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory reports are read from.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the election finance report `name`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidReportId] if `name` contains anything other than
    /// ASCII letters, digits and hyphens, [Error::DataReadError] if the file
    /// could not be read and [Error::JSONDeserializationError] if the file is
    /// not a valid report.
    pub async fn load_election_finance(&self, name: &str) -> Result<EfData, Error> {
        validate_id(name)?;

        let path = self
            .data_dir
            .join(ELECTION_FINANCE_DIR)
            .join(format!("{ELECTION_FINANCE_PREFIX}{name}{JSON_EXTENSION}"));

        read_json(&path).await
    }

    /// The names of every election finance report, sorted.
    ///
    /// A missing directory is logged and treated as empty.
    pub async fn list_election_finance_names(&self) -> Vec<String> {
        let directory = self.data_dir.join(ELECTION_FINANCE_DIR);

        let mut names: Vec<String> = list_file_names(&directory)
            .await
            .into_iter()
            .filter_map(|file_name| {
                file_name
                    .strip_prefix(ELECTION_FINANCE_PREFIX)?
                    .strip_suffix(JSON_EXTENSION)
                    .map(str::to_owned)
            })
            .filter(|name| validate_id(name).is_ok())
            .collect();

        names.sort();
        names
    }

    /// Load every accounting report of the politician `politician_id`.
    ///
    /// # Errors
    ///
    /// Fails in the same way as [DataSource::load_election_finance].
    pub async fn load_politician_reports(
        &self,
        kind: ReportKind,
        politician_id: &str,
    ) -> Result<AccountingReports, Error> {
        validate_id(politician_id)?;

        let path = self
            .data_dir
            .join(kind.directory())
            .join(format!("{politician_id}{JSON_EXTENSION}"));

        read_json(&path).await
    }

    /// Every year of every politician's reports, sorted by politician ID and
    /// then newest year first.
    ///
    /// Files that cannot be loaded are logged and skipped.
    pub async fn list_politician_reports(&self, kind: ReportKind) -> Vec<ReportListing> {
        let directory = self.data_dir.join(kind.directory());
        let mut listings = Vec::new();

        for file_name in list_file_names(&directory).await {
            let Some(politician_id) = file_name.strip_suffix(JSON_EXTENSION) else {
                continue;
            };

            let reports = match self.load_politician_reports(kind, politician_id).await {
                Ok(reports) => reports,
                Err(error) => {
                    tracing::warn!("Skipping politician reports {file_name}: {error}");
                    continue;
                }
            };

            listings.extend(reports.reports().map(|report| ReportListing {
                politician_id: politician_id.to_owned(),
                year: report.year,
                name: reports.profile.name.clone(),
            }));
        }

        listings.sort_by(|a, b| {
            a.politician_id
                .cmp(&b.politician_id)
                .then(b.year.cmp(&a.year))
        });
        listings
    }
}

/// Check that `id` is safe to use as part of a file name.
fn validate_id(id: &str) -> Result<(), Error> {
    let is_valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidReportId(id.to_owned()))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let contents = fs::read_to_string(path).await.map_err(|error| {
        tracing::warn!("Could not read {}: {error}", path.display());
        Error::DataReadError(format!("{}: {error}", path.display()))
    })?;

    serde_json::from_str(&contents).map_err(|error| {
        tracing::error!("Could not parse {}: {error}", path.display());
        Error::JSONDeserializationError(format!("{}: {error}", path.display()))
    })
}

async fn list_file_names(directory: &Path) -> Vec<String> {
    let mut entries = match fs::read_dir(directory).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!("Could not read directory {}: {error}", directory.display());
            return Vec::new();
        }
    };

    let mut file_names = Vec::new();

    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                if let Some(file_name) = entry.file_name().to_str() {
                    file_names.push(file_name.to_owned());
                }
            }
            Ok(None) => break,
            Err(error) => {
                tracing::warn!("Could not list directory {}: {error}", directory.display());
                break;
            }
        }
    }

    file_names
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use crate::Error;

    use super::{DataSource, ReportKind, ReportListing};

    const EF_JSON: &str = r#"{
        "metadata": { "date": "2024-10-27", "title": "テスト選挙", "name": "山田太郎" },
        "transactions": [
            { "data_id": "1", "category": "income", "date": null, "price": 1000, "type": "寄附" }
        ]
    }"#;

    fn politician_json(id: &str, name: &str, years: &[i32]) -> String {
        let data: Vec<String> = years
            .iter()
            .map(|year| {
                format!(
                    r#"{{ "report": {{ "id": "{id}-{year}", "totalIncome": 0, "totalExpense": 0, "totalBalance": 0, "year": {year} }}, "transactions": [] }}"#
                )
            })
            .collect();

        format!(
            r#"{{ "id": "{id}", "latestReportId": "{id}-{}", "profile": {{ "name": "{name}", "title": "", "party": "" }}, "data": [{}] }}"#,
            years[0],
            data.join(",")
        )
    }

    fn write(root: &Path, relative_path: &str, contents: &str) {
        let path = root.join(relative_path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "election-finance/ef-demo.json", EF_JSON);
        write(dir.path(), "election-finance/ef-another-1.json", EF_JSON);
        write(dir.path(), "election-finance/ef-broken.json", "{");
        write(dir.path(), "election-finance/notes.txt", "");
        write(
            dir.path(),
            "politicians/taro.json",
            &politician_json("taro", "山田太郎", &[2022, 2023]),
        );
        write(
            dir.path(),
            "politicians/hanako.json",
            &politician_json("hanako", "鈴木花子", &[2023]),
        );
        write(
            dir.path(),
            "uniformed/taro.json",
            &politician_json("taro", "山田太郎", &[2023]),
        );
        dir
    }

    #[tokio::test]
    async fn loads_election_finance_report() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let report = data.load_election_finance("demo").await.unwrap();

        assert_eq!(report.metadata.title, "テスト選挙");
        assert_eq!(report.transactions.len(), 1);
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        for name in ["../politicians/taro", "demo.json", "", "デモ"] {
            let result = data.load_election_finance(name).await;

            assert_eq!(result, Err(Error::InvalidReportId(name.to_owned())));
        }
    }

    #[tokio::test]
    async fn missing_report_is_a_read_error() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let result = data.load_election_finance("missing").await;

        assert!(matches!(result, Err(Error::DataReadError(_))));
    }

    #[tokio::test]
    async fn malformed_report_is_a_deserialization_error() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let result = data.load_election_finance("broken").await;

        assert!(matches!(result, Err(Error::JSONDeserializationError(_))));
    }

    #[tokio::test]
    async fn lists_election_finance_names_sorted() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let names = data.list_election_finance_names().await;

        assert_eq!(names, ["another-1", "broken", "demo"]);
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataSource::new(dir.path());

        assert!(data.list_election_finance_names().await.is_empty());
        assert!(
            data.list_politician_reports(ReportKind::Standard)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn loads_politician_reports_by_kind() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let standard = data
            .load_politician_reports(ReportKind::Standard, "taro")
            .await
            .unwrap();
        let uniformed = data
            .load_politician_reports(ReportKind::Uniformed, "taro")
            .await
            .unwrap();

        assert_eq!(standard.data.len(), 2);
        assert_eq!(uniformed.data.len(), 1);
        assert!(
            data.load_politician_reports(ReportKind::Uniformed, "hanako")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn lists_politician_reports_by_id_then_newest_year() {
        let dir = data_dir();
        let data = DataSource::new(dir.path());

        let listings = data.list_politician_reports(ReportKind::Standard).await;

        let listing = |politician_id: &str, year, name: &str| ReportListing {
            politician_id: politician_id.to_owned(),
            year,
            name: name.to_owned(),
        };
        assert_eq!(
            listings,
            [
                listing("hanako", 2023, "鈴木花子"),
                listing("taro", 2023, "山田太郎"),
                listing("taro", 2022, "山田太郎"),
            ]
        );
    }
}
