use serde_json::Value;

/// Walks a dotted path such as `validators.active` through nested objects.
fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |value, segment| value.get(segment))
}

/// The value of the first candidate that is present and not null. Candidate order is the
/// priority, key order in the document is irrelevant.
pub fn resolve<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|path| lookup(record, path).filter(|value| !value.is_null()))
}

/// Numbers keep the text they were sent as, so integers past u64 don't turn into floats.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn resolve_text(record: &Value, candidates: &[&str]) -> Option<String> {
    resolve(record, candidates).and_then(scalar_text)
}

fn non_negative_integer(value: &Value) -> Option<u64> {
    let from_float = |float: f64| {
        if float.is_finite() && float >= 0.0 && float <= u64::MAX as f64 {
            Some(float.trunc() as u64)
        } else {
            None
        }
    };

    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(from_float)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(from_float))
        }
        _ => None,
    }
}

/// None when no candidate is present or the winning one isn't a non-negative number.
pub fn resolve_number(record: &Value, candidates: &[&str]) -> Option<u64> {
    resolve(record, candidates).and_then(non_negative_integer)
}

/// Counters feed rate arithmetic, so absence is zero rather than unknown.
pub fn resolve_counter(record: &Value, candidates: &[&str]) -> u64 {
    resolve_number(record, candidates).unwrap_or(0)
}

/// Lists arrive bare or wrapped in an object under one of `list_keys`.
pub fn extract_list<'a>(document: &'a Value, list_keys: &[&str]) -> Option<&'a Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(_) => list_keys
            .iter()
            .find_map(|key| document.get(key).and_then(Value::as_array)),
        _ => None,
    }
}
