//! Inline style declarations.
//!
//! [CSSOM § 6.6 CSS Declaration Blocks](https://www.w3.org/TR/cssom-1/#css-declaration-blocks)
//!
//! "A CSS declaration block is an ordered collection of CSS properties with
//! their associated values, also named CSS declarations."

use std::fmt;

/// An ordered map of CSS property names to their textual values.
///
/// Setting a property that already exists replaces its value in place, so
/// declaration order is the order of first assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    /// Create an empty declaration block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Look up the value of `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// [CSSOM § 6.6.1](https://www.w3.org/TR/cssom-1/#dom-cssstyledeclaration-setproperty)
    ///
    /// "If value is the empty string, invoke removeProperty() with property
    /// as argument and return."
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let property = property.trim().to_ascii_lowercase();
        let value = value.into().trim().to_string();
        if value.is_empty() {
            let _ = self.remove(&property);
            return;
        }
        if let Some(slot) = self
            .declarations
            .iter_mut()
            .find(|(name, _)| *name == property)
        {
            slot.1 = value;
        } else {
            self.declarations.push((property, value));
        }
    }

    /// Remove `property`, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self
            .declarations
            .iter()
            .position(|(name, _)| name == property)?;
        Some(self.declarations.remove(index).1)
    }

    /// Copy every declaration of `other` into this block.
    pub fn merge(&mut self, other: &Self) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    /// Iterate over `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the block has no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// [CSSOM § 6.6.2](https://www.w3.org/TR/cssom-1/#parse-a-css-declaration-block)
    ///
    /// Parse the text of a `style` attribute. Declarations without a colon
    /// are dropped, later duplicates win.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();
        for declaration in text.split(';') {
            if let Some((property, value)) = declaration.split_once(':') {
                if !property.trim().is_empty() {
                    map.set(property, value);
                }
            }
        }
        map
    }
}

impl fmt::Display for StyleMap {
    /// [CSSOM § 6.7](https://www.w3.org/TR/cssom-1/#serialize-a-css-declaration-block)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (property, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (property, value) in iter {
            map.set(property.as_ref(), value);
        }
        map
    }
}

/// Convert a computed length to pixels.
///
/// Only absolute `px` lengths and bare numbers are understood; anything else
/// (`auto`, keywords, empty strings) is zero.
#[must_use]
pub fn parse_px(value: &str) -> f32 {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f32>()
        .ok()
        .filter(|px| px.is_finite())
        .unwrap_or(0.0)
}

/// Format a pixel length the way computed styles report it.
#[must_use]
pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// [CSS Cascading § 7.1 Initial Values](https://www.w3.org/TR/css-cascade-4/#initial-values)
///
/// Initial value for the properties the headless document understands.
#[must_use]
pub fn initial_value(property: &str) -> &'static str {
    match property {
        "position" => "static",
        "display" => "block",
        "left" | "top" | "right" | "bottom" | "width" | "height" => "auto",
        p if p.starts_with("margin-")
            || p.starts_with("padding-")
            || (p.starts_with("border-") && p.ends_with("-width")) =>
        {
            "0px"
        }
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), 12.0);
        assert_eq!(parse_px(" 3.5px "), 3.5);
        assert_eq!(parse_px("7"), 7.0);
        assert_eq!(parse_px("auto"), 0.0);
        assert_eq!(parse_px(""), 0.0);
        assert_eq!(parse_px("medium"), 0.0);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut map = StyleMap::new();
        map.set("left", "1px");
        map.set("top", "2px");
        map.set("LEFT", "3px");
        assert_eq!(map.to_string(), "left: 3px; top: 2px;");
    }

    #[test]
    fn test_empty_value_removes() {
        let mut map = StyleMap::parse("width: 10px; height: 4px");
        map.set("width", "");
        assert_eq!(map.get("width"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_skips_garbage() {
        let map = StyleMap::parse("color red; : 1px; margin-top: 4px;");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("margin-top"), Some("4px"));
    }

    #[test]
    fn test_initial_values() {
        assert_eq!(initial_value("border-left-width"), "0px");
        assert_eq!(initial_value("padding-top"), "0px");
        assert_eq!(initial_value("position"), "static");
        assert_eq!(initial_value("width"), "auto");
        assert_eq!(initial_value("color"), "");
    }
}
