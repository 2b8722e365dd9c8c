use validator::ValidationErrors;

pub mod auth;
pub mod products;

/// Names of the fields that failed the `required` rule, sorted.
fn missing_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut missing: Vec<String> = errors
        .field_errors()
        .into_iter()
        .filter(|(_, errs)| errs.iter().any(|err| err.code == "required"))
        .map(|(field, _)| field.to_string())
        .collect();
    missing.sort();
    missing
}

/// Trim, collapse inner whitespace and drop control characters.
fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line and squeeze runs of blank lines into one.
fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut previous_empty = true;

    for line in input.lines().map(sanitize_inline_text) {
        if line.is_empty() {
            if !previous_empty {
                result.push(String::new());
            }
            previous_empty = true;
        } else {
            result.push(line);
            previous_empty = false;
        }
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}

/// Blank (after sanitizing) text counts as absent.
fn non_blank(value: Option<String>, sanitize: fn(&str) -> String) -> Option<String> {
    value
        .map(|raw| sanitize(&raw))
        .filter(|value| !value.is_empty())
}
