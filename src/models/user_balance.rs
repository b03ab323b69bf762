use serde_json::{Map, Value};

pub const TELEGRAM_ID_COLUMN: &str = "Telegram ID";
pub const BALANCE_COLUMN: &str = "Balance";

/// One worksheet row keyed by header name.
pub type RowRecord = Map<String, Value>;

/// A balance parsed from a worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct UserBalance {
    pub telegram_id: i64,
    pub balance: f64,
}

impl UserBalance {
    /// Parse a row into a balance entry.
    ///
    /// Rows without an integer identifier are not ours and yield `None`. A
    /// missing or unparseable balance is read as zero.
    pub fn from_record(record: &RowRecord) -> Option<Self> {
        let telegram_id = record.get(TELEGRAM_ID_COLUMN).and_then(parse_identifier)?;
        let balance = parse_balance(record.get(BALANCE_COLUMN));

        Some(Self {
            telegram_id,
            balance,
        })
    }
}

pub fn parse_identifier(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn parse_balance(value: Option<&Value>) -> f64 {
    let parsed: Option<f64> = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let normalized: String = s.chars().filter(|c| *c != ' ' && *c != ',').collect();
            normalized.trim().parse().ok()
        }
        _ => None,
    };

    // NaN and infinities can't be stored as a balance
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Text of a cell as the sheet would display it.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(|f| f.to_string()),
        },
        other => Some(other.to_string()),
    }
}
