// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Front-matter splitting.

/// Split a Markdown document into its YAML front-matter and body.
///
/// ```text
/// ---
/// title: Hello
/// ---
///
/// # Body
/// ```
///
/// A document without an opening `---` line, or without a closing one,
/// has no front-matter: the YAML part is empty and the body is the whole
/// input.
pub fn split_frontmatter(content: &str) -> (String, String) {
    let trimmed = content.trim_start();
    let Some(after) = trimmed.strip_prefix("---") else {
        return (String::new(), content.to_string());
    };
    // The opening fence must be alone on its line
    let after = match after.strip_prefix("\r\n").or_else(|| after.strip_prefix('\n')) {
        Some(rest) => rest,
        None => return (String::new(), content.to_string()),
    };

    // Closing fence, possibly immediately (empty front-matter)
    let (yaml_end, body_start) = if let Some(rest) = after.strip_prefix("---") {
        (0, after.len() - rest.len())
    } else if let Some(end) = after.find("\n---") {
        (end, end + 4)
    } else {
        return (String::new(), content.to_string());
    };

    let body = &after[body_start..];
    // Drop the remainder of the closing fence line
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    (after[..yaml_end].trim().to_string(), body.to_string())
}
