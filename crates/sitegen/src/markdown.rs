// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering and shortcode expansion.
//!
//! Bodies are rendered with pulldown-cmark. The page `<h1>` comes from
//! the layout, so body headings are shifted down one level (`#` renders
//! as `<h2>`). Headings get slug ids, deduplicated per document.
//!
//! Shortcodes use `{{ name key="value" /}}` syntax and are expanded
//! before Markdown parsing.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html::push_html};
use std::collections::{HashMap, HashSet};

// ─── Markdown rendering ──────────────────────────────────────────────────────

/// Render a Markdown body to an HTML fragment.
///
/// GFM tables, strikethrough and task lists are enabled. Raw HTML passes
/// through unchanged.
pub fn render_markdown(content: &str) -> String {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(content, options);

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, HeadingRewriter::default().rewrite(parser).into_iter());
    html
}

/// Lowercase, non-alphanumeric runs become `-`, no leading or trailing `-`.
///
/// Non-ASCII letters (kana, kanji) are kept as they are.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }
    slug
}

fn demote(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 2,
        HeadingLevel::H2 => 3,
        HeadingLevel::H3 => 4,
        HeadingLevel::H4 => 5,
        HeadingLevel::H5 | HeadingLevel::H6 => 6,
    }
}

/// Buffers each heading, then emits it one level down with an `id`.
#[derive(Default)]
struct HeadingRewriter {
    used_ids: HashSet<String>,
}

impl HeadingRewriter {
    fn unique_id(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            return base;
        }
        let mut id = base.clone();
        let mut n = 2;
        while !self.used_ids.insert(id.clone()) {
            id = format!("{base}-{n}");
            n += 1;
        }
        id
    }

    fn rewrite<'a>(mut self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        let mut heading: Option<(HeadingLevel, Vec<Event<'a>>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) if heading.is_none() => {
                    heading = Some((level, Vec::new(), String::new()));
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    let Some((level, inner, text)) = heading.take() else {
                        continue;
                    };
                    let n = demote(level);
                    let id = self.unique_id(&text);
                    let open = if id.is_empty() {
                        format!("<h{n}>")
                    } else {
                        format!("<h{n} id=\"{id}\">")
                    };
                    events.push(Event::Html(CowStr::from(open)));
                    events.extend(inner);
                    events.push(Event::Html(CowStr::from(format!("</h{n}>\n"))));
                }
                event => match heading.as_mut() {
                    Some((_, inner, text)) => {
                        if let Event::Text(t) | Event::Code(t) = &event {
                            text.push_str(t);
                        }
                        inner.push(event);
                    }
                    None => events.push(event),
                },
            }
        }
        events
    }
}

// ─── Shortcodes ──────────────────────────────────────────────────────────────

/// A registered shortcode function.
pub type ShortcodeFn = Box<dyn Fn(&ShortcodeArgs) -> String + Send + Sync>;

/// Registry of named shortcode functions.
#[derive(Default)]
pub struct Shortcodes(HashMap<String, ShortcodeFn>);

impl Shortcodes {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&ShortcodeArgs) -> String + Send + Sync + 'static,
    {
        self.0.insert(name.to_string(), Box::new(func));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn call(&self, name: &str, args: &ShortcodeArgs) -> Result<String, String> {
        self.0
            .get(name)
            .map(|func| func(args))
            .ok_or_else(|| format!("Unknown shortcode: '{name}'"))
    }
}

/// Parsed `key="value"` arguments. A block shortcode's inner text is
/// passed as `body`.
#[derive(Debug, Default)]
pub struct ShortcodeArgs(HashMap<String, String>);

impl ShortcodeArgs {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Integer argument, `default` when absent or malformed.
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.get_str(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// One `{{ ... }}` tag.
#[derive(Debug, PartialEq)]
struct ShortcodeTag {
    name: String,
    args: HashMap<String, String>,
    self_closing: bool,
}

/// Expand shortcodes in `content`.
///
/// - Self-closing: `{{ site_name /}}`
/// - With args: `{{ latest kind="news" limit="3" /}}`
/// - Block: `{{ note }}...{{ /note }}`, the inner text expanded first
/// - Escaped: `\{{ literal }}` renders as `{{ literal }}`
///
/// Tags whose name is not a valid identifier are left as text.
pub fn preprocess_shortcodes(content: &str, shortcodes: &Shortcodes) -> Result<String, String> {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find("{{") {
        if rest[..open].ends_with('\\') {
            out.push_str(&rest[..open - 1]);
            out.push_str("{{");
            rest = &rest[open + 2..];
            continue;
        }
        out.push_str(&rest[..open]);

        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let inner = &after_open[..close];
        let after_tag = &after_open[close + 2..];

        let tag = match parse_tag(inner)? {
            Some(tag) => tag,
            None => {
                out.push_str("{{");
                rest = after_open;
                continue;
            }
        };

        if tag.self_closing {
            out.push_str(&shortcodes.call(&tag.name, &ShortcodeArgs(tag.args))?);
            rest = after_tag;
            continue;
        }

        let (body, remainder) = split_block(after_tag, &tag.name).ok_or_else(|| {
            format!(
                "Block shortcode '{0}' missing closing tag. Use '{{{{ {0} /}}}}' for self-closing.",
                tag.name
            )
        })?;
        let mut args = tag.args;
        args.insert("body".to_string(), preprocess_shortcodes(body, shortcodes)?);
        out.push_str(&shortcodes.call(&tag.name, &ShortcodeArgs(args))?);
        rest = remainder;
    }

    out.push_str(rest);
    Ok(out)
}

/// Find `{{ /name }}` (any inner spacing); returns (body, text after it).
fn split_block<'a>(text: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find("{{") {
        let start = offset + pos;
        let after = &text[start + 2..];
        let end = after.find("}}")?;
        let inner = after[..end].trim();
        if inner.strip_prefix('/').map(str::trim) == Some(name) {
            return Some((&text[..start], &after[end + 2..]));
        }
        offset = start + 2;
    }
    None
}

/// Parse the text between `{{` and `}}`. `Ok(None)` for non-shortcodes.
fn parse_tag(inner: &str) -> Result<Option<ShortcodeTag>, String> {
    let inner = inner.trim();
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (inner, false),
    };

    let (name, arg_text) = inner
        .split_once(char::is_whitespace)
        .unwrap_or((inner, ""));
    if name.is_empty() {
        return Err("Empty shortcode".to_string());
    }
    if let Some(closing) = name.strip_prefix('/') {
        return Err(format!("Unexpected closing tag: /{closing}"));
    }
    if !is_valid_name(name) {
        return Ok(None);
    }

    Ok(Some(ShortcodeTag {
        name: name.to_string(),
        args: parse_args(arg_text)?,
        self_closing,
    }))
}

/// `[A-Za-z_][A-Za-z0-9_]+`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() >= 2
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `key="value" key2='v2' key3=bare`. Quoted values accept `\"`,
/// `\\`, `\n` and `\t` escapes.
fn parse_args(input: &str) -> Result<HashMap<String, String>, String> {
    let mut args = HashMap::new();
    let mut chars = input.trim().chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let key: String = std::iter::from_fn(|| chars.next_if(|&c| c != '=' && !c.is_whitespace()))
            .collect();
        if key.is_empty() {
            break;
        }
        if chars.next_if_eq(&'=').is_none() {
            return Err(format!("Argument '{key}' has no value"));
        }

        let mut value = String::new();
        match chars.next_if(|&c| c == '"' || c == '\'') {
            Some(quote) => loop {
                match chars.next() {
                    None => return Err("Unclosed quote in argument value".to_string()),
                    Some(c) if c == quote => break,
                    Some('\\') => match chars.next() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some(c @ ('"' | '\'' | '\\')) => value.push(c),
                        Some(c) => {
                            value.push('\\');
                            value.push(c);
                        }
                        None => return Err("Unclosed quote in argument value".to_string()),
                    },
                    Some(c) => value.push(c),
                }
            },
            None => value.extend(std::iter::from_fn(|| chars.next_if(|c| !c.is_whitespace()))),
        }
        args.insert(key, value);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_demotes_headings() {
        let html = render_markdown("# 施工の流れ\n\n本文\n\n## Step 1\n");
        assert!(html.contains(r#"<h2 id="施工の流れ">施工の流れ</h2>"#), "{html}");
        assert!(html.contains(r#"<h3 id="step-1">Step 1</h3>"#), "{html}");
        assert!(html.contains("<p>本文</p>"));
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render_markdown("## FAQ\n\n## FAQ\n\n## FAQ\n");
        assert!(html.contains(r#"id="faq""#));
        assert!(html.contains(r#"id="faq-2""#));
        assert!(html.contains(r#"id="faq-3""#));
    }

    #[test]
    fn test_heading_with_inline_markup() {
        let html = render_markdown("## Use `cargo` **now**\n");
        assert!(html.contains(r#"<h3 id="use-cargo-now">Use <code>cargo</code> <strong>now</strong></h3>"#), "{html}");
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Leading & Trailing  "), "leading-trailing");
        assert_eq!(slugify("保証制度 Q&A"), "保証制度-q-a");
        assert_eq!(slugify("!!!"), "");
    }

    fn registry() -> Shortcodes {
        let mut sc = Shortcodes::new();
        sc.register("site_name", |_| "山田工務店".to_string());
        sc.register("greet", |args| format!("Hi {}", args.get_str("name").unwrap_or("?")));
        sc.register("note", |args| format!("<aside>{}</aside>", args.get_str("body").unwrap_or("")));
        sc
    }

    #[test]
    fn test_shortcode_self_closing() {
        let out = preprocess_shortcodes("ようこそ {{ site_name /}} へ", &registry()).unwrap();
        assert_eq!(out, "ようこそ 山田工務店 へ");
    }

    #[test]
    fn test_shortcode_args() {
        let out = preprocess_shortcodes(r#"{{ greet name="World" /}}"#, &registry()).unwrap();
        assert_eq!(out, "Hi World");
        let out = preprocess_shortcodes("{{ greet name=bare /}}", &registry()).unwrap();
        assert_eq!(out, "Hi bare");
    }

    #[test]
    fn test_shortcode_block_expands_inner() {
        let out =
            preprocess_shortcodes("{{ note }}by {{ site_name /}}{{/note}} end", &registry()).unwrap();
        assert_eq!(out, "<aside>by 山田工務店</aside> end");
    }

    #[test]
    fn test_shortcode_escaped_and_invalid() {
        let out = preprocess_shortcodes(r"\{{ site_name /}} and {{ 1x }}", &registry()).unwrap();
        assert_eq!(out, "{{ site_name /}} and {{ 1x }}");
    }

    #[test]
    fn test_shortcode_errors() {
        let sc = registry();
        assert!(preprocess_shortcodes("{{ missing /}}", &sc).unwrap_err().contains("Unknown"));
        assert!(preprocess_shortcodes("{{ note }}open", &sc).unwrap_err().contains("missing closing"));
        assert!(preprocess_shortcodes("{{ /note }}", &sc).unwrap_err().contains("Unexpected"));
        assert!(preprocess_shortcodes(r#"{{ greet name="x /}}"#, &sc).is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(r#"kind="news" limit='3' title="a \"b\"""#).unwrap();
        assert_eq!(args["kind"], "news");
        assert_eq!(args["limit"], "3");
        assert_eq!(args["title"], "a \"b\"");
        assert!(parse_args("").unwrap().is_empty());
        assert!(parse_args("flag").is_err());
    }
}
