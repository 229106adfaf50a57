/// Splits the body of a block into its integer keyed child records.
///
/// A record boundary is a `}` followed, after optional whitespace, by a bare
/// integer and `=`. The brace stays with the preceding record and the
/// whitespace in between is dropped. This is a boundary scan, not a brace
/// matcher, siblings in a collection are flat `<id>=` entries so the pattern
/// is enough to tell them apart.
///
/// Whitespace only input yields no records.
pub fn split_records(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut records = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'}' || i < start {
            continue;
        }
        if let Some(next) = record_start(bytes, i + 1) {
            push_record(&mut records, &body[start..=i]);
            start = next;
        }
    }
    push_record(&mut records, &body[start..]);
    records
}

/// Returns the position of the integer key starting a record, if the text
/// from `from` on is whitespace followed by `<digits>=`.
fn record_start(bytes: &[u8], from: usize) -> Option<usize> {
    let key_start = from
        + bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
    let digits = bytes[key_start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits > 0 && bytes.get(key_start + digits) == Some(&b'=') {
        Some(key_start)
    } else {
        None
    }
}

fn push_record<'a>(records: &mut Vec<&'a str>, chunk: &'a str) {
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        records.push(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(split_records("").is_empty());
        assert!(split_records(" \n\t ").is_empty());
    }

    #[test]
    fn test_single() {
        let records = split_records("1=\n{\nkey=\"NAME_Sol\"\n}\n");
        assert_eq!(records, vec!["1=\n{\nkey=\"NAME_Sol\"\n}"]);
    }

    #[test]
    fn test_multiple() {
        let body = "1=\n{\nx=1\n}\n2=\n{\nx=2\n}\n\n  30=\n{\nx=3\n}\n";
        let records = split_records(body);
        assert_eq!(records.len(), 3);
        assert!(records[0].starts_with("1="));
        assert!(records[1].starts_with("2="));
        assert!(records[2].starts_with("30="));
        assert!(records[2].ends_with('}'));
    }

    #[test]
    fn test_nested_braces_do_not_split() {
        let body = "1={ hyperlane={ { to=2 } { to=3 } } }\n2={ }";
        let records = split_records(body);
        assert_eq!(records, vec!["1={ hyperlane={ { to=2 } { to=3 } } }", "2={ }"]);
    }

    #[test]
    fn test_non_integer_key_does_not_split() {
        let body = "1={ coordinates={ x=1 } origin=2 }";
        assert_eq!(split_records(body).len(), 1);
        let body = "1={ a={ } b=2 }";
        assert_eq!(split_records(body).len(), 1);
    }

    #[test]
    fn test_inner_integer_key_splits() {
        // the boundary pattern is all we have, nested integer keys look like siblings
        let body = "1={ planets={ } 5=6 }";
        assert_eq!(split_records(body), vec!["1={ planets={ }", "5=6 }"]);
    }

    #[test]
    fn test_order_preserved() {
        let body = "9={}\n3={}\n5={}";
        assert_eq!(split_records(body), vec!["9={}", "3={}", "5={}"]);
    }
}
