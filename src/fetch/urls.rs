// src/fetch/urls.rs
use crate::dates::YearMonth;

/// Last period published under the old `-citibike-tripdata.csv.zip` naming.
/// The provider renamed the archives from 202405 onward; this cutoff mirrors
/// their historical format change, it is not a rule of ours.
const LEGACY_SUFFIX_CUTOFF: YearMonth = YearMonth::new(2024, 4);

const DATASET_NAME: &str = "citibike-tripdata";

/// Build the archive URL for one period.
///
/// `base_url` is expected to end with a slash. Periods at or before the
/// legacy cutoff get the extra `.csv` infix the provider used early on.
pub fn resolve_archive_url(base_url: &str, period: YearMonth) -> String {
    let legacy_suffix = if period <= LEGACY_SUFFIX_CUTOFF {
        ".csv"
    } else {
        ""
    };
    format!(
        "{}{}-{}{}.zip",
        base_url,
        period.token(),
        DATASET_NAME,
        legacy_suffix
    )
}
