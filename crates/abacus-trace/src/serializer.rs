//! JSON and line serialization of step traces.
use crate::TraceError;
use abacus_core::Step;
use serde_json::Value;

pub fn to_json(steps: &[Step]) -> Result<String, TraceError> {
    Ok(serde_json::to_string(steps)?)
}

pub fn to_json_pretty(steps: &[Step]) -> Result<String, TraceError> {
    Ok(serde_json::to_string_pretty(steps)?)
}

pub fn from_json(input: &str) -> Result<Vec<Step>, TraceError> {
    Ok(serde_json::from_str(input)?)
}

/// One line per step, `KIND key=value ...`, closed by `END`.
///
/// Keys use the JSON field names in sorted order. Padding positions print
/// as `-`, and strings containing spaces are quoted.
pub fn serialize_trace(steps: &[Step]) -> Result<String, TraceError> {
    let mut out = String::new();

    for step in steps {
        out.push_str(&step.kind().to_uppercase());
        if let Value::Object(fields) = serde_json::to_value(step)? {
            let mut fields: Vec<_> = fields.iter().filter(|(k, _)| k.as_str() != "type").collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            for (k, v) in fields {
                out.push(' ');
                out.push_str(k);
                out.push('=');
                out.push_str(&render_value(v));
            }
        }
        out.push('\n');
    }

    out.push_str("END");
    Ok(out)
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) if s.contains(' ') || s.is_empty() => format!("{:?}", s),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
