//! Cleanup of backend text before structural parsing

/// Strip Markdown code fences and keep the outermost `{ ... }` span.
///
/// Text without braces is returned fence-stripped and trimmed, so that the
/// parser reports the failure instead of this function guessing.
pub fn sanitize_json(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => unfenced[start..=end].to_string(),
        _ => unfenced.trim().to_string(),
    }
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```JSON", "").replace("```", "")
}
