use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::analysis::record::{DayBucket, NutritionRecord};

/// In-memory day-bucketed history. At most one bucket per calendar day;
/// buckets are kept sorted most recent first after every mutation.
#[derive(Debug, Clone, Default)]
pub struct DayLedger {
    buckets: Vec<DayBucket>,
}

impl DayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously stored buckets.
    pub fn from_buckets(mut buckets: Vec<DayBucket>) -> Self {
        buckets.sort_by(|a, b| b.date.cmp(&a.date));
        Self { buckets }
    }

    /// Files a record under today's bucket, creating the bucket if this is
    /// the first record of the day.
    pub fn upsert(&mut self, record: NutritionRecord) {
        self.upsert_on(Local::now().date_naive(), record);
    }

    pub fn upsert_on(&mut self, day: NaiveDate, record: NutritionRecord) {
        match self.buckets.iter_mut().find(|b| b.date == day) {
            Some(bucket) => {
                bucket.total_calories += record.calories;
                bucket.entries.push(record);
            }
            None => self.buckets.push(DayBucket::new(day, vec![record])),
        }
        self.buckets.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn bucket_for(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.buckets.iter().find(|b| b.date == date)
    }

    /// All buckets, date-descending.
    pub fn all(&self) -> &[DayBucket] {
        &self.buckets
    }

    /// Removes one record from the bucket holding it. A bucket emptied by
    /// the removal is dropped. Returns false if no such record exists.
    pub fn remove_record(&mut self, date: NaiveDate, id: Uuid) -> bool {
        let Some(bucket_idx) = self.buckets.iter().position(|b| b.date == date) else {
            return false;
        };
        let bucket = &mut self.buckets[bucket_idx];
        let Some(entry_idx) = bucket.entries.iter().position(|r| r.id == id) else {
            return false;
        };
        let removed = bucket.entries.remove(entry_idx);
        bucket.total_calories -= removed.calories;
        if bucket.entries.is_empty() {
            self.buckets.remove(bucket_idx);
        }
        true
    }
}
