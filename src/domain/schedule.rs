//! Calendar projections of scheduled publications.
//!
//! [`project_month`] buckets a month's publications into day cells for the
//! editorial calendar; [`upcoming`] lists what goes live next. Both share the
//! same annotate-and-sort step ([`annotate_sorted`]).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::domain::publication::Publication;
use crate::domain::types::{ContentKind, PublicationId, PublicationStatus, TypeConstraintError};

/// A validated year/month pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    next_first_day: NaiveDate,
}

impl CalendarMonth {
    /// `month` is 1-indexed.
    pub fn new(year: i32, month: u32) -> Result<Self, TypeConstraintError> {
        let invalid = || TypeConstraintError::InvalidCalendarMonth { year, month };
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first_day = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            next_first_day,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in the month, leap years included.
    pub fn days_in_month(&self) -> u32 {
        (self.next_first_day - self.first_day).num_days() as u32
    }

    /// Weekday of the 1st, counting from Sunday = 0.
    pub fn first_weekday(&self) -> u32 {
        self.first_day.weekday().num_days_from_sunday()
    }

    /// Midnight of the 1st.
    pub fn start(&self) -> NaiveDateTime {
        self.first_day.and_time(NaiveTime::MIN)
    }

    /// Midnight of the 1st of the following month (exclusive bound).
    pub fn end(&self) -> NaiveDateTime {
        self.next_first_day.and_time(NaiveTime::MIN)
    }

    pub fn contains(&self, moment: &NaiveDateTime) -> bool {
        moment.year() == self.year && moment.month() == self.month
    }
}

/// A publication flattened for calendar and listing views.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduledEntry {
    pub id: PublicationId,
    pub publication_date: NaiveDateTime,
    pub status: PublicationStatus,
    #[serde(rename = "type")]
    pub content_type: ContentKind,
    pub content_id: i32,
    /// Empty when the referenced content could not be resolved.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl From<Publication> for ScheduledEntry {
    fn from(publication: Publication) -> Self {
        let (title, author) = match publication.summary {
            Some(summary) => (
                summary.title.into_inner(),
                Some(summary.author.into_inner()),
            ),
            None => (String::new(), None),
        };

        Self {
            id: publication.id,
            publication_date: publication.publication_date,
            status: publication.status,
            content_type: publication.content.kind(),
            content_id: publication.content.content_id(),
            title,
            author,
        }
    }
}

/// One day of the monthly calendar.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayCell {
    /// 1-indexed day of the month.
    pub day_number: u32,
    pub publications: Vec<ScheduledEntry>,
}

/// Day-by-day view of a month's publications.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySchedule {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub first_weekday: u32,
    pub days: Vec<DayCell>,
}

/// Annotate publications and order them by publication date.
///
/// Publications sharing a date keep their input order.
pub fn annotate_sorted<I>(publications: I) -> Vec<ScheduledEntry>
where
    I: IntoIterator<Item = Publication>,
{
    let mut entries: Vec<ScheduledEntry> =
        publications.into_iter().map(ScheduledEntry::from).collect();
    entries.sort_by_key(|entry| entry.publication_date);
    entries
}

/// Bucket publications into the days of `month`.
///
/// Publications dated outside `month` are dropped rather than folded into the
/// cell with the same day number, so callers may pass a wider date range.
pub fn project_month(month: CalendarMonth, publications: Vec<Publication>) -> MonthlySchedule {
    let mut days: Vec<DayCell> = (1..=month.days_in_month())
        .map(|day_number| DayCell {
            day_number,
            publications: Vec::new(),
        })
        .collect();

    let entries = annotate_sorted(
        publications
            .into_iter()
            .filter(|publication| month.contains(&publication.publication_date)),
    );
    for entry in entries {
        let index = entry.publication_date.day0() as usize;
        if let Some(cell) = days.get_mut(index) {
            cell.publications.push(entry);
        }
    }

    MonthlySchedule {
        year: month.year(),
        month: month.month(),
        days_in_month: month.days_in_month(),
        first_weekday: month.first_weekday(),
        days,
    }
}

/// The next `limit` scheduled publications dated at or after `now`.
pub fn upcoming(
    publications: Vec<Publication>,
    now: NaiveDateTime,
    limit: usize,
) -> Vec<ScheduledEntry> {
    let mut entries = annotate_sorted(publications.into_iter().filter(|publication| {
        publication.status == PublicationStatus::Scheduled && publication.publication_date >= now
    }));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::publication::{ContentRef, ContentSummary};
    use crate::domain::types::{ArticleId, AuthorName, ContentTitle, RecipeId};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn publication(id: i32, date: NaiveDateTime, content: ContentRef) -> Publication {
        Publication {
            id: PublicationId::new(id).unwrap(),
            publication_date: date,
            status: PublicationStatus::Scheduled,
            content,
            summary: Some(ContentSummary {
                title: ContentTitle::new(format!("Title {id}")).unwrap(),
                author: AuthorName::new("Anna").unwrap(),
            }),
            created_at: date,
            updated_at: date,
        }
    }

    fn recipe(id: i32) -> ContentRef {
        ContentRef::Recipe(RecipeId::new(id).unwrap())
    }

    fn article(id: i32) -> ContentRef {
        ContentRef::Article(ArticleId::new(id).unwrap())
    }

    #[test]
    fn counts_days_including_leap_years() {
        assert_eq!(CalendarMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(CalendarMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(CalendarMonth::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(CalendarMonth::new(2024, 12).unwrap().days_in_month(), 31);
        assert_eq!(CalendarMonth::new(1900, 2).unwrap().days_in_month(), 28);
    }

    #[test]
    fn rejects_months_outside_range() {
        assert_eq!(
            CalendarMonth::new(2024, 13).unwrap_err(),
            TypeConstraintError::InvalidCalendarMonth {
                year: 2024,
                month: 13
            }
        );
        assert!(CalendarMonth::new(2024, 0).is_err());
    }

    #[test]
    fn empty_month_has_all_empty_cells() {
        let schedule = project_month(CalendarMonth::new(2024, 3).unwrap(), vec![]);

        assert_eq!(schedule.days_in_month, 31);
        assert_eq!(schedule.first_weekday, 5);
        assert_eq!(schedule.days.len(), 31);
        assert!(schedule.days.iter().all(|d| d.publications.is_empty()));
        assert_eq!(schedule.days[30].day_number, 31);
    }

    #[test]
    fn buckets_publications_by_day_of_month() {
        let schedule = project_month(
            CalendarMonth::new(2024, 5).unwrap(),
            vec![publication(1, at(2024, 5, 15, 9), recipe(1))],
        );

        for (index, day) in schedule.days.iter().enumerate() {
            if index == 14 {
                assert_eq!(day.publications.len(), 1);
                assert_eq!(day.publications[0].id, 1);
            } else {
                assert!(day.publications.is_empty());
            }
        }
    }

    #[test]
    fn orders_publications_within_a_day() {
        let schedule = project_month(
            CalendarMonth::new(2024, 5).unwrap(),
            vec![
                publication(1, at(2024, 5, 2, 18), recipe(1)),
                publication(2, at(2024, 5, 2, 8), article(1)),
            ],
        );

        let ids: Vec<i32> = schedule.days[1]
            .publications
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn drops_publications_from_other_months() {
        let schedule = project_month(
            CalendarMonth::new(2024, 5).unwrap(),
            vec![
                publication(1, at(2024, 6, 15, 9), recipe(1)),
                publication(2, at(2023, 5, 15, 9), recipe(2)),
            ],
        );

        assert!(schedule.days.iter().all(|d| d.publications.is_empty()));
    }

    #[test]
    fn derives_content_type_and_summary() {
        let mut orphan = publication(3, at(2024, 5, 1, 9), article(8));
        orphan.summary = None;
        let entries = annotate_sorted(vec![
            publication(1, at(2024, 5, 1, 7), recipe(4)),
            publication(2, at(2024, 5, 1, 8), article(5)),
            orphan,
        ]);

        assert_eq!(entries[0].content_type, ContentKind::Recipe);
        assert_eq!(entries[0].content_id, 4);
        assert_eq!(entries[0].title, "Title 1");
        assert_eq!(entries[0].author.as_deref(), Some("Anna"));
        assert_eq!(entries[1].content_type, ContentKind::Article);
        assert_eq!(entries[2].title, "");
        assert_eq!(entries[2].author, None);

        let value = serde_json::to_value(&entries[2]).unwrap();
        assert_eq!(value["type"], "article");
        assert!(value.get("author").is_none());
    }

    #[test]
    fn upcoming_keeps_future_scheduled_entries_in_order() {
        let now = at(2024, 5, 10, 12);
        let mut cancelled = publication(4, at(2024, 5, 11, 9), recipe(4));
        cancelled.status = PublicationStatus::Cancelled;
        let publications = vec![
            publication(1, at(2024, 5, 20, 9), recipe(1)),
            publication(2, at(2024, 5, 9, 9), recipe(2)),
            publication(3, at(2024, 5, 12, 9), article(3)),
            cancelled,
            publication(5, at(2024, 5, 10, 12), recipe(5)),
        ];

        let ids: Vec<i32> = upcoming(publications.clone(), now, 10)
            .iter()
            .map(|e| e.id.get())
            .collect();
        assert_eq!(ids, vec![5, 3, 1]);

        let limited = upcoming(publications, now, 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[1].id, 3);
    }
}
