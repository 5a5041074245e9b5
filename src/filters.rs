//! Identifier casing filters
//!
//! Registered on every template set so templates can derive C++ names from
//! schema identifiers, e.g. `{{ e.identifier | pascal_case }}`.

use std::collections::HashMap;

use tera::{Tera, Value};

/// Words always rendered in upper case by `pascal_case` and `camel_case`
const ACRONYMS: &[&str] = &[
    "ID", "URL", "UUID", "API", "HTTP", "JSON", "XML", "SQL", "URI", "UI", "IO",
];

/// Register all casing filters on a template set
pub fn register(tera: &mut Tera) {
    tera.register_filter("pascal_case", pascal_case_filter);
    tera.register_filter("camel_case", camel_case_filter);
    tera.register_filter("snake_case", snake_case_filter);
    tera.register_filter("screaming_snake_case", screaming_snake_case_filter);
}

fn string_arg<'a>(filter: &str, value: &'a Value) -> tera::Result<&'a str> {
    value.as_str().ok_or_else(|| {
        tera::Error::msg(format!(
            "filter `{}` expects a string, got {}",
            filter, value
        ))
    })
}

fn pascal_case_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_pascal_case(string_arg("pascal_case", value)?)))
}

fn camel_case_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_camel_case(string_arg("camel_case", value)?)))
}

fn snake_case_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_snake_case(string_arg("snake_case", value)?)))
}

fn screaming_snake_case_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        to_snake_case(string_arg("screaming_snake_case", value)?).to_uppercase(),
    ))
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c == ' '
}

/// Convert to PascalCase.
///
/// Known acronyms and words already in upper case keep their case; every
/// other word is capitalized and lowered after its first letter.
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(is_separator).filter(|w| !w.is_empty()) {
        let upper = word.to_uppercase();
        if word == upper || ACRONYMS.contains(&upper.as_str()) {
            out.push_str(&upper);
            continue;
        }
        let mut chars = word.chars();
        out.extend(chars.next().into_iter().flat_map(char::to_uppercase));
        out.push_str(&chars.as_str().to_lowercase());
    }
    out
}

/// PascalCase with a lower-case first letter; a leading acronym is lowered whole
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let acronym = ACRONYMS
        .iter()
        .filter(|a| pascal.starts_with(**a))
        .max_by_key(|a| a.len());
    let split = match acronym {
        Some(a) if !pascal[a.len()..].starts_with(char::is_lowercase) => a.len(),
        _ => pascal.chars().next().map_or(0, char::len_utf8),
    };
    format!("{}{}", pascal[..split].to_lowercase(), &pascal[split..])
}

/// Convert to snake_case, splitting on separators and camel-case humps
pub fn to_snake_case(s: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            // "fooBar" and the "S" in "HTTPServer" start a new word
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("_")
}
