//! Rendering of values reported in differences
//!
//! Records and sequences are rendered by walking their views, so an object
//! graph that loops back on itself prints a `Type@0xaddress` marker at the
//! back edge instead of recursing forever.

use crate::guard::ObjectIdentity;
use crate::traits::{Comparable, View};
use crate::types::NULL_VALUE;

/// Render a value, cutting cycles through records
pub fn render_value(value: &dyn Comparable) -> String {
    let mut visiting = Vec::new();
    render_into(value, &mut visiting)
}

fn render_into(value: &dyn Comparable, visiting: &mut Vec<ObjectIdentity>) -> String {
    match value.view() {
        View::Record(record) => {
            let descriptor = value.descriptor();
            let identity = ObjectIdentity::of(descriptor.id(), &*record);
            let name = short_type_name(descriptor.name());
            if visiting.contains(&identity) {
                return format!("{}@{:#x}", name, identity.address());
            }

            visiting.push(identity);
            let fields: Vec<String> = record
                .fields()
                .iter()
                .map(|field| {
                    let rendered = match field.value() {
                        Some(value) => render_into(value, visiting),
                        None => NULL_VALUE.to_string(),
                    };
                    format!("{}: {}", field.name(), rendered)
                })
                .collect();
            visiting.pop();

            if fields.is_empty() {
                name
            } else {
                format!("{} {{ {} }}", name, fields.join(", "))
            }
        }
        View::Sequence(elements) => {
            let rendered: Vec<String> = elements
                .map(|element| match element {
                    Some(element) => render_into(element, visiting),
                    None => NULL_VALUE.to_string(),
                })
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        View::Leaf | View::Decimal(_) => value.render(),
    }
}

/// Strip module paths from every segment of a type name,
/// `alloc::vec::Vec<app::Line>` -> `Vec<Line>`
pub fn short_type_name(name: &str) -> String {
    let mut short = String::with_capacity(name.len());
    let mut segment = String::new();
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            short.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            short.push(c);
        }
    }
    short.push_str(segment.rsplit("::").next().unwrap_or_default());
    short
}
