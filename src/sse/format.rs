//! Canonical SSE re-serialization.

/// Render an event as `event:<name>\n[data:<payload>\n]\n`.
///
/// The `data:` line is written only for a non-empty payload. Stream and
/// object conversion both render through here.
pub fn format_sse_value(event_name: &str, payload: Option<&str>) -> String {
    let payload = payload.filter(|p| !p.is_empty());
    let mut out = String::with_capacity(
        event_name.len() + payload.map_or(0, |p| p.len() + 6) + 8,
    );
    out.push_str("event:");
    out.push_str(event_name);
    out.push('\n');
    if let Some(payload) = payload {
        out.push_str("data:");
        out.push_str(payload);
        out.push('\n');
    }
    out.push('\n');
    out
}
