//! Tách khối văn bản tường thuật thành danh sách đoạn/ý.

/// Các hình dạng đầu vào mà backend có thể gửi cho một trường văn bản.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBlock<'a> {
    List(&'a [String]),
    Text(&'a str),
    Absent,
}

impl<'a> From<&'a str> for TextBlock<'a> {
    fn from(value: &'a str) -> Self {
        TextBlock::Text(value)
    }
}

impl<'a> From<&'a [String]> for TextBlock<'a> {
    fn from(value: &'a [String]) -> Self {
        TextBlock::List(value)
    }
}

impl<'a> From<Option<&'a str>> for TextBlock<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(TextBlock::Absent, TextBlock::Text)
    }
}

/// Chuyển một khối văn bản thành chuỗi ý theo thứ tự gốc.
///
/// Danh sách được giữ nguyên (chỉ trim từng phần tử, không lọc phần tử rỗng).
/// Chuỗi được tách theo dòng trống, bỏ các đoạn rỗng sau khi trim; đoạn còn lại giữ nguyên văn.
pub fn to_points(value: TextBlock<'_>) -> Vec<String> {
    match value {
        TextBlock::List(items) => items.iter().map(|item| item.trim().to_string()).collect(),
        TextBlock::Text(text) => split_paragraphs(text),
        TextBlock::Absent => Vec::new(),
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let unified = text.replace("\r\n", "\n");
    unified
        .split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(to_points("A\n\nB\n\nC".into()), vec!["A", "B", "C"]);
    }

    #[test]
    fn single_line_is_one_point() {
        assert_eq!(to_points("just one line".into()), vec!["just one line"]);
    }

    #[test]
    fn single_newline_does_not_split() {
        assert_eq!(
            to_points("line one\nline two".into()),
            vec!["line one\nline two"]
        );
    }

    #[test]
    fn absent_is_empty() {
        assert!(to_points(TextBlock::Absent).is_empty());
        assert!(to_points(TextBlock::from(None::<&str>)).is_empty());
    }

    #[test]
    fn blank_paragraphs_are_dropped() {
        assert_eq!(
            to_points("\n\nFirst\n\n   \n\nSecond\n\n".into()),
            vec!["First", "Second"]
        );
        assert!(to_points("   ".into()).is_empty());
    }

    #[test]
    fn paragraphs_keep_surrounding_whitespace() {
        assert_eq!(
            to_points("  Rest well \n\n\nDrink water".into()),
            vec!["  Rest well ", "\nDrink water"]
        );
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(to_points("A\r\n\r\nB".into()), vec!["A", "B"]);
    }

    #[test]
    fn lists_keep_empty_entries() {
        let items = vec![" Rest ".to_string(), String::new()];
        assert_eq!(to_points(items.as_slice().into()), vec!["Rest", ""]);
    }

    proptest! {
        #[test]
        fn list_input_is_idempotent(items in proptest::collection::vec(".{0,20}", 0..8)) {
            let once = to_points(TextBlock::List(&items));
            let twice = to_points(TextBlock::List(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn text_points_are_never_blank(text in "[a-z \n]{0,60}") {
            for point in to_points(TextBlock::Text(&text)) {
                prop_assert!(!point.trim().is_empty());
            }
        }
    }
}
