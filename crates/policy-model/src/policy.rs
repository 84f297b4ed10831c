use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned policy identifier. `0` marks a policy that has not been created yet.
pub type PolicyId = u64;

/// One insurance policy as carried on the wire (`camelCase` JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, deserialize_with = "null_as_default")]
    #[serde(skip_serializing_if = "is_unassigned")]
    pub policy_id: PolicyId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policy_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub policy_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub premium_amount: f64,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    // Bean-style serializers emit `active` for an `isActive` getter.
    #[serde(default, alias = "active", deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_id: u32,
}

impl Policy {
    /// A blank draft dated today, used to reset the edit form.
    pub fn empty() -> Self {
        Self::empty_on(Local::now().date_naive())
    }

    /// A blank draft with both dates set to `date`.
    pub fn empty_on(date: NaiveDate) -> Self {
        Self {
            policy_id: 0,
            policy_number: String::new(),
            policy_type: String::new(),
            premium_amount: 0.0,
            start_date: date,
            end_date: date,
            is_active: false,
            customer_id: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        is_unassigned(&self.policy_id)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::empty()
    }
}

fn is_unassigned(id: &PolicyId) -> bool {
    *id == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Dates go out as `YYYY-MM-DD`. Incoming values may also be full ISO-8601
/// timestamps or epoch milliseconds; only the calendar date is kept.
mod calendar_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDate::deserialize(deserializer)? {
            RawDate::Text(text) => parse(&text).map_err(de::Error::custom),
            RawDate::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .map(|ts| ts.date_naive())
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {}", ms))),
        }
    }

    pub(crate) fn parse(text: &str) -> Result<NaiveDate, String> {
        let text = text.trim();
        if let Ok(date) = NaiveDate::parse_from_str(text, FORMAT) {
            return Ok(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
            return Ok(ts.date_naive());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(ts.date());
        }
        Err(format!("invalid date '{}': expected YYYY-MM-DD", text))
    }
}

/// Parses a date the same way policy payloads are decoded.
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    calendar_date::parse(text)
}

/// Parses a premium amount. `NaN` and infinities are refused since they
/// cannot be represented in a JSON payload.
pub fn parse_amount(text: &str) -> Result<f64, String> {
    let text = text.trim();
    let amount = text
        .parse::<f64>()
        .map_err(|e| format!("invalid amount '{}': {}", text, e))?;
    if !amount.is_finite() {
        return Err(format!("invalid amount '{}': must be a finite number", text));
    }
    Ok(amount)
}
