//! Patient metadata collected by the intake form.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Input and wire format for the date of birth.
pub const DATE_OF_BIRTH_FORMAT: &str = "%Y-%m-%d";

/// Wire format for the diagnosis timestamp (minute precision, no zone).
pub const DIAGNOSIS_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Patient fields held for the lifetime of one session.
///
/// `age` is derived: it is only written by [`PatientRecord::set_date_of_birth`]
/// and is not recomputed afterwards, even if the wall-clock date moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient name as typed
    pub name: String,

    /// Most recently entered date of birth (None while incomplete)
    date_of_birth: Option<NaiveDate>,

    /// Whole years derived from `date_of_birth` at entry time
    age: Option<u32>,

    /// Moment of diagnosis, fixed when the form is opened
    diagnosis_timestamp: NaiveDateTime,
}

impl PatientRecord {
    /// Create an empty record whose diagnosis timestamp is `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            date_of_birth: None,
            age: None,
            diagnosis_timestamp: default_diagnosis_timestamp(now),
        }
    }

    /// Record a new date of birth and recompute the age against `today`.
    ///
    /// `None` (an incomplete or unparseable entry) clears the age.
    pub fn set_date_of_birth(&mut self, dob: Option<NaiveDate>, today: NaiveDate) {
        self.date_of_birth = dob;
        self.age = dob.map(|d| age_on(d, today));
    }

    #[must_use]
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    #[must_use]
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    #[must_use]
    pub fn diagnosis_timestamp(&self) -> NaiveDateTime {
        self.diagnosis_timestamp
    }

    /// Diagnosis timestamp in wire format.
    #[must_use]
    pub fn diagnosis_timestamp_text(&self) -> String {
        self.diagnosis_timestamp
            .format(DIAGNOSIS_TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Text fields sent alongside the image, in form order.
    ///
    /// Missing values are sent as empty strings.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            (
                "dob",
                self.date_of_birth
                    .map(|d| d.format(DATE_OF_BIRTH_FORMAT).to_string())
                    .unwrap_or_default(),
            ),
            (
                "age",
                self.age.map(|a| a.to_string()).unwrap_or_default(),
            ),
            ("diagnosisDateTime", self.diagnosis_timestamp_text()),
        ]
    }
}

/// Whole years between `dob` and `today`.
///
/// The calendar year difference, minus one when the birthday has not yet come
/// round in `today`'s year. Dates after `today` are not rejected: a partial
/// year ahead counts as a whole one, so a date of birth one day in the future
/// yields 1 and the result is never negative.
#[must_use]
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    if dob <= today {
        return whole_years(dob, today);
    }

    let years = whole_years(today, dob);
    if (today.month(), today.day()) == (dob.month(), dob.day()) {
        years
    } else {
        years + 1
    }
}

fn whole_years(earlier: NaiveDate, later: NaiveDate) -> u32 {
    let mut years = later.year() - earlier.year();
    if (later.month(), later.day()) < (earlier.month(), earlier.day()) {
        years -= 1;
    }

    u32::try_from(years).unwrap_or(0)
}

/// Default diagnosis timestamp: `now` in UTC, truncated to the minute.
#[must_use]
pub fn default_diagnosis_timestamp(now: DateTime<Utc>) -> NaiveDateTime {
    let naive = now.naive_utc();
    naive
        .date()
        .and_hms_opt(naive.hour(), naive.minute(), 0)
        .unwrap_or(naive)
}

/// Parse a typed date of birth (`YYYY-MM-DD`).
#[must_use]
pub fn parse_date_of_birth(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_OF_BIRTH_FORMAT).ok()
}
