//! Constant-name inflection.

/// `Shop::LineItem` → `shop/line_item`, `HTMLParser` → `html_parser`.
pub fn underscore(name: &str) -> String {
    let name = name.trim_start_matches("::").replace("::", "/");
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let after_lower = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            // End of an acronym: `HTMLParser` splits before `P`.
            let acronym_end = prev.is_ascii_uppercase() && next.is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || acronym_end {
                out.push('_');
            }
        }
        match c {
            '-' => out.push('_'),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_constant_paths() {
        assert_eq!(underscore("Foo"), "foo");
        assert_eq!(underscore("LineItem"), "line_item");
        assert_eq!(underscore("Shop::LineItem"), "shop/line_item");
        assert_eq!(underscore("::Shop::Order"), "shop/order");
        assert_eq!(underscore("HTMLParser"), "html_parser");
        assert_eq!(underscore("Version2Upgrade"), "version2_upgrade");
        assert_eq!(underscore("API"), "api");
    }
}
