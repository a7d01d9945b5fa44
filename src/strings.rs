// String literals decode the escapes \n, \" and \\. Any other backslash pair
// is kept as written.

fn unescape(c: char) -> Option<char> {
    match c {
        '\\' => Some('\\'),
        '"' => Some('"'),
        'n' => Some('\n'),
        _ => None,
    }
}

/// Decodes the body of a string literal, quotes already stripped.
pub(crate) fn build_string(src: &str) -> String {
    let mut output = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) => match unescape(escaped) {
                Some(decoded) => output.push(decoded),
                None => {
                    output.push('\\');
                    output.push(escaped);
                }
            },
            // The tokenizer never hands over a trailing lone backslash.
            None => output.push('\\'),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_escapes() {
        assert_eq!(build_string(r#"a\nb"#), "a\nb");
        assert_eq!(build_string(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(build_string(r#"back\\slash"#), "back\\slash");
        assert_eq!(build_string("plain"), "plain");
    }

    #[test]
    fn passes_other_escapes_through() {
        assert_eq!(build_string(r#"a\tb"#), r#"a\tb"#);
        assert_eq!(build_string(r#"\q\\"#), r#"\q\"#);
        assert_eq!(build_string("oops\\"), "oops\\");
    }
}
