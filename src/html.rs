// src/html.rs
//
// Element lookups over a parsed page. `find_tag` is for structure the page
// must have; `find_optional` is for things that may legitimately be absent.

use scraper::{ElementRef, Selector};

use crate::error::ScrapeError;

/// Build a CSS selector from a tag name and attribute filters.
/// `class` matches one entry of the class list; other keys match exactly.
fn selector_for(tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut css = tag.to_string();
    for (key, value) in attrs {
        let value = value.replace('\\', "\\\\").replace('"', "\\\"");
        if *key == "class" {
            css.push_str(&format!("[class~=\"{}\"]", value));
        } else {
            css.push_str(&format!("[{}=\"{}\"]", key, value));
        }
    }
    css
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css: css.to_string(),
        reason: format!("{:?}", e),
    })
}

fn describe_attrs(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{}={:?}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// First descendant of `root` matching `tag` and `attrs`, or `TagNotFound`.
pub fn find_tag<'a>(
    root: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<ElementRef<'a>, ScrapeError> {
    find_optional(root, tag, attrs)?.ok_or_else(|| ScrapeError::TagNotFound {
        tag: tag.to_string(),
        attrs: describe_attrs(attrs),
    })
}

/// First descendant of `root` matching `tag` and `attrs`, if any.
pub fn find_optional<'a>(
    root: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let selector = parse_selector(&selector_for(tag, attrs))?;
    let found = root.select(&selector).next();
    Ok(found)
}

/// All descendants of `root` matching `tag` and `attrs`, in document order.
pub fn find_all<'a>(
    root: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = parse_selector(&selector_for(tag, attrs))?;
    let found = root.select(&selector).collect();
    Ok(found)
}

/// Concatenated text of every text node under `el`.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
