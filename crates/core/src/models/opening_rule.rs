use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring weekly window during which a court accepts bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRule {
    pub id: Uuid,
    pub court_id: Uuid,
    #[serde(with = "weekday_index")]
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

/// Opening rule fields supplied by an administrator, before an id exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOpeningRule {
    pub court_id: Uuid,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
}

/// Partial update of an opening rule. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpeningRuleChanges {
    pub weekday: Option<Weekday>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub active: Option<bool>,
}

impl OpeningRuleChanges {
    pub fn apply_to(&self, rule: &OpeningRule) -> OpeningRule {
        OpeningRule {
            id: rule.id,
            court_id: rule.court_id,
            weekday: self.weekday.unwrap_or(rule.weekday),
            start_time: self.start_time.unwrap_or(rule.start_time),
            end_time: self.end_time.unwrap_or(rule.end_time),
            active: self.active.unwrap_or(rule.active),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOpeningRuleRequest {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOpeningRuleRequest {
    pub weekday: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub active: Option<bool>,
}

/// Converts a Monday-based day index (0..=6) into a [`Weekday`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_to_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

/// Serializes a [`Weekday`] as its Monday-based index.
pub mod weekday_index {
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_to_index(*weekday))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index)
            .ok_or_else(|| D::Error::custom(format!("weekday index out of range: {index}")))
    }
}
