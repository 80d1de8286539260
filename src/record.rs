use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::escape_html;

/// One blood-sugar reading.
///
/// `id` is assigned by the store on insert; `0` means the reading has not
/// been persisted. No field is validated: `date` is expected as
/// `YYYY-MM-DD` and `time` as `HH:MM`, but any text is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub email: String,
    pub blood_sugar: i32,
    pub date: String,
    pub time: String,
    pub notes: String,
}

impl Record {
    /// Build an unsaved reading.
    pub fn new(
        email: impl Into<String>,
        blood_sugar: i32,
        date: impl Into<String>,
        time: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self::with_id(0, email, blood_sugar, date, time, notes)
    }

    pub fn with_id(
        id: i64,
        email: impl Into<String>,
        blood_sugar: i32,
        date: impl Into<String>,
        time: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            blood_sugar,
            date: date.into(),
            time: time.into(),
            notes: notes.into(),
        }
    }

    /// One `<tr>` with cells id, email, blood sugar, date, time, notes.
    pub fn to_html_row(&self) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            self.id,
            escape_html(&self.email),
            self.blood_sugar,
            escape_html(&self.date),
            escape_html(&self.time),
            escape_html(&self.notes),
        )
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::with_id(0, "none@test.com", 0, "1970-01-01", "00:01 AM", "none")
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} on {} at {}",
            self.id, self.email, self.blood_sugar, self.date, self.time
        )?;
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placeholders() {
        let record = Record::default();
        assert_eq!(record.id, 0);
        assert_eq!(record.email, "none@test.com");
        assert_eq!(record.blood_sugar, 0);
        assert_eq!(record.date, "1970-01-01");
        assert_eq!(record.time, "00:01 AM");
        assert_eq!(record.notes, "none");
    }

    #[test]
    fn test_html_row_cell_order() {
        let record = Record::with_id(7, "a@b.c", 120, "2015-12-01", "03:30", "fasting");
        assert_eq!(
            record.to_html_row(),
            "<tr><td>7</td><td>a@b.c</td><td>120</td><td>2015-12-01</td>\
             <td>03:30</td><td>fasting</td></tr>\n"
        );
    }

    #[test]
    fn test_display() {
        let record = Record::with_id(3, "a@b.c", 95, "2015-12-01", "08:00", "");
        assert_eq!(record.to_string(), "#3 a@b.c 95 on 2015-12-01 at 08:00");
    }
}
