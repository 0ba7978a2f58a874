use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder name used until the parser finds a usable title line.
pub const UNKNOWN_FOOD: &str = "Unknown Food";

/// One analyzed food item. The macro fields stay free text ("25g") on
/// purpose; the upstream model reply is unstructured and we do not try to
/// normalize units. `id` and `timestamp` are fixed at construction and
/// survive serialization unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionRecord {
    pub id: Uuid,
    pub food_name: String,
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub ingredients: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl NutritionRecord {
    pub fn new(
        food_name: String,
        calories: u32,
        protein: String,
        carbs: String,
        fat: String,
        ingredients: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            food_name,
            calories,
            protein,
            carbs,
            fat,
            ingredients,
            timestamp: Utc::now(),
        }
    }
}

/// All records committed on one calendar day, plus the running calorie
/// total. `total_calories` always equals the sum over `entries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayBucket {
    pub id: Uuid,
    pub date: NaiveDate,
    pub entries: Vec<NutritionRecord>,
    pub total_calories: u32,
}

impl DayBucket {
    pub fn new(date: NaiveDate, entries: Vec<NutritionRecord>) -> Self {
        let total_calories = entries.iter().map(|r| r.calories).sum();
        Self {
            id: Uuid::new_v4(),
            date,
            entries,
            total_calories,
        }
    }
}
