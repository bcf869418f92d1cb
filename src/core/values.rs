use serde_json::{Map, Number, Value};

/// Decodes a Firestore REST `fields` object into plain JSON.
///
/// Never fails: anything that is not a recognised typed value is kept as the
/// raw JSON the emulator sent.
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Decodes one typed value such as `{"integerValue": "42"}`.
pub fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value
        .as_object()
        .filter(|obj| obj.len() == 1)
        .and_then(|obj| obj.iter().next())
    else {
        return value.clone();
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" if inner.is_boolean() => inner.clone(),
        // integers travel as decimal strings to keep 64-bit precision
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| value.clone()),
            Value::Number(n) if n.is_i64() => inner.clone(),
            _ => value.clone(),
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            // NaN and Infinity arrive as strings and have no JSON form
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => value.clone(),
        },
        "stringValue" | "timestampValue" | "bytesValue" | "referenceValue" if inner.is_string() => {
            inner.clone()
        }
        "geoPointValue" if inner.is_object() => inner.clone(),
        "arrayValue" if inner.is_object() => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" if inner.is_object() => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => value.clone(),
    }
}
