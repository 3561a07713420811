use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A rentable venue. Prices are whole naira.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price_per_day: i64,
    pub charges_fee: i64,
}

/// Hall record as the lookup endpoint names its fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HallRecord {
    #[serde(deserialize_with = "whole_number")]
    pub hall_id: i64,
    pub hall_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "whole_number")]
    pub base_booking_fee: i64,
    #[serde(default, deserialize_with = "whole_number")]
    pub booking_charges: i64,
}

// The PHP endpoint sends ids and amounts as integers, decimals or numeric strings.
// Decimals round to whole naira; null reads as zero.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(0),
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(round_finite)),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse::<i64>()
                .ok()
                .or_else(|| raw.parse::<f64>().ok().and_then(round_finite))
        }
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom(format!("expected a whole number, got {value}")))
}

fn round_finite(amount: f64) -> Option<i64> {
    amount.is_finite().then(|| amount.round() as i64)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HallEnvelope {
    pub data: HallRecord,
}

impl From<HallRecord> for Hall {
    fn from(record: HallRecord) -> Self {
        Hall {
            id: record.hall_id,
            name: record.hall_name,
            image: record.image_url,
            description: record.description,
            price_per_day: record.base_booking_fee,
            charges_fee: record.booking_charges,
        }
    }
}

impl From<HallEnvelope> for Hall {
    fn from(envelope: HallEnvelope) -> Self {
        envelope.data.into()
    }
}
