//! Pulling `name = value;` assignments and loose numbers out of VEX lines.

use lazy_static::lazy_static;
use regex::Regex;

use crate::VexError;

lazy_static! {
    /// A signed decimal number, e.g. "-5440057.370", "099" or "58.59375".
    static ref NUMBER: Regex = Regex::new(r"[-+]?\d+\.?\d*").expect("valid regex");
}

/// Is this line a VEX comment? Leading whitespace is ignored.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('*')
}

/// Does this line open (or close) a block with the given keyword? Leading
/// whitespace is ignored.
pub(crate) fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.trim_start().starts_with(keyword)
}

/// A located field assignment within a line.
#[derive(Debug, PartialEq)]
pub(crate) struct Field<'a> {
    /// The assigned value with all whitespace removed.
    pub(crate) value: String,

    /// Everything after the value's terminating `;` or `:`. Empty if the
    /// value ran to the end of the line.
    pub(crate) tail: &'a str,

    /// Everything after the `=`, unmodified.
    pub(crate) raw: &'a str,
}

/// Find the assignment to `name` in `line`. Only the first occurrence of
/// `name` is considered; if it turns out not to be followed by `=` (ignoring
/// whitespace), there is no assignment. Comment lines never have assignments.
pub(crate) fn locate_field<'a>(name: &str, line: &'a str) -> Option<Field<'a>> {
    if is_comment(line) {
        return None;
    }
    let idx = line.find(name)?;
    let after_name = &line[idx + name.len()..];

    let mut raw = None;
    for (i, c) in after_name.char_indices() {
        match c {
            c if c.is_whitespace() => continue,
            '=' => {
                raw = Some(&after_name[i + 1..]);
                break;
            }
            // The name matched, but something other than an assignment
            // follows it (e.g. it was part of a longer word or a value).
            _ => return None,
        }
    }
    let raw = raw?;

    let mut value = String::new();
    let mut tail = "";
    for (i, c) in raw.char_indices() {
        match c {
            ';' | ':' => {
                tail = &raw[i + 1..];
                break;
            }
            c if c.is_whitespace() => (),
            c => value.push(c),
        }
    }

    Some(Field { value, tail, raw })
}

/// Get the value assigned to `name` in `line`. `None` is returned if the line
/// is a comment, doesn't assign to `name`, or assigns an empty value.
pub fn extract_field(name: &str, line: &str) -> Option<String> {
    locate_field(name, line)
        .map(|f| f.value)
        .filter(|v| !v.is_empty())
}

/// Iterate over the signed decimal numbers embedded in some text, in order.
pub(crate) fn scan_numbers(text: &str) -> impl Iterator<Item = &str> {
    NUMBER.find_iter(text).map(|m| m.as_str())
}

/// Parse all of the signed decimal numbers embedded in some text.
pub fn parse_numbers(text: &str) -> Result<Vec<f64>, VexError> {
    scan_numbers(text)
        .map(|s| s.parse().map_err(|_| VexError::ParseNumber(s.to_string())))
        .collect()
}

/// Parse the first `N` numbers embedded in some text. Any extra numbers are
/// ignored.
pub(crate) fn parse_leading_numbers<const N: usize>(
    text: &str,
    field: &'static str,
    line_num: usize,
) -> Result<[f64; N], VexError> {
    let numbers = parse_numbers(text)?;
    if numbers.len() < N {
        return Err(VexError::TooFewNumbers {
            field,
            expected: N,
            found: numbers.len(),
            line_num,
        });
    }
    let mut out = [0.0; N];
    out.copy_from_slice(&numbers[..N]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn comment_lines_are_never_fields() {
        assert_eq!(extract_field("foo", "* foo = bar;"), None);
        assert_eq!(extract_field("foo", "   * foo = bar;"), None);
    }

    #[test]
    fn simple_assignments() {
        assert_eq!(extract_field("foo", "foo=bar;").as_deref(), Some("bar"));
        assert_eq!(extract_field("foo", "foo = bar : ").as_deref(), Some("bar"));
        assert_eq!(extract_field("foo", "  foo = bar\n").as_deref(), Some("bar"));
    }

    #[test]
    fn a_name_inside_a_value_is_not_a_field() {
        assert_eq!(extract_field("bar", "foo = bar;"), None);
        // "ra" first appears inside "frame".
        assert_eq!(extract_field("ra", "ref_coord_frame = J2000;"), None);
    }

    #[test]
    fn spaces_inside_values_are_dropped() {
        assert_eq!(
            extract_field("dec", "dec = -29d00' 28.118\";").as_deref(),
            Some("-29d00'28.118\"")
        );
    }

    #[test]
    fn several_fields_on_one_line() {
        let line = "    source_name = SGRA; ra = 17h45m40.0409s; dec = -29d00'28.118\";";
        assert_eq!(extract_field("source_name", line).as_deref(), Some("SGRA"));
        assert_eq!(extract_field("ra", line).as_deref(), Some("17h45m40.0409s"));
        assert_eq!(extract_field("dec", line).as_deref(), Some("-29d00'28.118\""));
        assert_eq!(extract_field("ref_coord_frame", line), None);
    }

    #[test]
    fn empty_values_are_absent() {
        assert_eq!(extract_field("foo", "foo = ;"), None);
        assert_eq!(extract_field("foo", "foo ="), None);
    }

    #[test]
    fn tail_follows_the_terminator() {
        let f = locate_field("station", "station=Aa:    0 sec:  600 sec: 1.5 GB:").unwrap();
        assert_eq!(f.value, "Aa");
        assert_eq!(f.tail, "    0 sec:  600 sec: 1.5 GB:");

        let f = locate_field("foo", "foo = bar").unwrap();
        assert_eq!(f.tail, "");
        assert_eq!(f.raw, " bar");
    }

    #[test]
    fn numbers() {
        let numbers = parse_numbers("site_position = 2225061.164 m: -5440057.370 m: +2.5e m;")
            .unwrap();
        assert_eq!(numbers.len(), 3);
        assert_abs_diff_eq!(numbers[0], 2225061.164);
        assert_abs_diff_eq!(numbers[1], -5440057.370);
        assert_abs_diff_eq!(numbers[2], 2.5);

        assert_eq!(
            scan_numbers("2016y099d05h00m00s").collect::<Vec<_>>(),
            ["2016", "099", "05", "00", "00"]
        );
    }

    #[test]
    fn too_few_numbers() {
        let result = parse_leading_numbers::<3>("1 2", "site_position", 7);
        assert!(matches!(
            result,
            Err(VexError::TooFewNumbers {
                expected: 3,
                found: 2,
                line_num: 7,
                ..
            })
        ));

        let [a, b] = parse_leading_numbers::<2>("1 2 3", "chan_def", 1).unwrap();
        assert_abs_diff_eq!(a, 1.0);
        assert_abs_diff_eq!(b, 2.0);
    }
}
