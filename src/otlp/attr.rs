use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use serde_json::json;

/// A scalar attribute value read out of an OTLP attribute list.
///
/// Arrays, kvlists and bytes have no scalar form; they stringify the same
/// way the exporters render them.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::StringValue(s) => AttrValue::String(s),
            Value::BoolValue(b) => AttrValue::Bool(b),
            Value::IntValue(i) => AttrValue::Int(i),
            Value::DoubleValue(d) => AttrValue::Double(d),
            Value::ArrayValue(a) => AttrValue::String(json!(a).to_string()),
            Value::KvlistValue(kv) => AttrValue::String(json!(kv).to_string()),
            Value::BytesValue(b) => AttrValue::String(hex::encode(b)),
        }
    }
}

/// Look up a key and convert its value.
pub fn get(key: &str, attrs: &[KeyValue]) -> Option<AttrValue> {
    find_value(key, attrs).map(|v| v.clone().into())
}

/// Look up a string attribute. A key present with any other type is treated
/// as absent.
pub fn get_str<'a>(key: &str, attrs: &'a [KeyValue]) -> Option<&'a str> {
    match find_value(key, attrs) {
        Some(Value::StringValue(s)) => Some(s.as_str()),
        _ => None,
    }
}

pub fn get_int(key: &str, attrs: &[KeyValue]) -> Option<i64> {
    match find_value(key, attrs) {
        Some(Value::IntValue(i)) => Some(*i),
        _ => None,
    }
}

pub fn get_double(key: &str, attrs: &[KeyValue]) -> Option<f64> {
    match find_value(key, attrs) {
        Some(Value::DoubleValue(d)) => Some(*d),
        _ => None,
    }
}

pub fn get_bool(key: &str, attrs: &[KeyValue]) -> Option<bool> {
    match find_value(key, attrs) {
        Some(Value::BoolValue(b)) => Some(*b),
        _ => None,
    }
}

fn find_value<'a>(key: &str, attrs: &'a [KeyValue]) -> Option<&'a Value> {
    attrs
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_ref())
        .and_then(|v| v.value.as_ref())
}
