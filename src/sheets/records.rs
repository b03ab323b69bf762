use crate::models::user_balance::cell_text;
use crate::models::{BALANCE_COLUMN, RowRecord, TELEGRAM_ID_COLUMN};
use serde_json::Value;

/// Convert raw rows (first row as headers) into header-keyed records.
///
/// Short rows are padded with empty strings. Columns with an empty header are
/// dropped.
pub fn records_from_values(values: &[Vec<Value>]) -> Vec<RowRecord> {
    let Some((header_row, rows)) = values.split_first() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|v| header_name(v).unwrap_or_default())
        .collect();

    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(idx, header)| {
                    let value = row
                        .get(idx)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()));
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Locate the balance cell for a user as 1-based (row, column).
///
/// The first data row whose identifier cell reads `telegram_id` wins. The
/// balance column is resolved by header, falling back to the cell right of
/// the identifier.
pub fn locate_balance_cell(values: &[Vec<Value>], telegram_id: i64) -> Option<(usize, usize)> {
    let header_row = values.first()?;
    let id_column = column_index(header_row, TELEGRAM_ID_COLUMN)?;
    let balance_column = column_index(header_row, BALANCE_COLUMN).unwrap_or(id_column + 1);

    let needle = telegram_id.to_string();
    let row_index = values.iter().skip(1).position(|row| {
        row.get(id_column)
            .and_then(cell_text)
            .is_some_and(|text| text == needle)
    })?;

    // Skipped header plus 1-based rows
    Some((row_index + 2, balance_column + 1))
}

fn column_index(header_row: &[Value], name: &str) -> Option<usize> {
    header_row
        .iter()
        .position(|v| header_name(v).is_some_and(|header| header == name))
}

/// Header cell text with surrounding whitespace removed.
fn header_name(value: &Value) -> Option<String> {
    cell_text(value).map(|text| text.trim().to_string())
}

/// A1 range covering every used cell of a tab.
pub fn sheet_range(name: &str) -> String {
    quoted_sheet(name)
}

/// Column letters for a 1-based column index (1 -> A, 27 -> AA).
pub fn column_letter(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Quote a sheet title for A1 notation.
pub fn quoted_sheet(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_values() -> Vec<Vec<Value>> {
        vec![
            vec![json!("Name"), json!("Phone"), json!("Telegram ID"), json!("Balance")],
            vec![json!("Alice"), json!("+998 90"), json!("111"), json!("1,234.50")],
            vec![json!("Bob"), json!("+998 91"), json!("222")],
            vec![json!("Bob again"), json!(""), json!("222"), json!("5")],
        ]
    }

    #[test]
    fn test_records_from_values() {
        let records = records_from_values(&mock_values());

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["Name"], json!("Alice"));
        assert_eq!(records[0]["Balance"], json!("1,234.50"));
        assert_eq!(records[1]["Balance"], json!(""), "short rows are padded");
    }

    #[test]
    fn test_records_from_values_empty() {
        assert!(records_from_values(&[]).is_empty());
    }

    #[test]
    fn test_records_from_values_headers_only() {
        let values = vec![vec![json!("Telegram ID"), json!("Balance")]];
        assert!(records_from_values(&values).is_empty());
    }

    #[test]
    fn test_records_from_values_drops_unnamed_columns() {
        let values = vec![
            vec![json!("Telegram ID"), json!(""), json!("Balance")],
            vec![json!("1"), json!("note"), json!("2")],
        ];
        let records = records_from_values(&values);
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_locate_balance_cell() {
        assert_eq!(locate_balance_cell(&mock_values(), 111), Some((2, 4)));
    }

    #[test]
    fn test_locate_balance_cell_first_duplicate_wins() {
        assert_eq!(locate_balance_cell(&mock_values(), 222), Some((3, 4)));
    }

    #[test]
    fn test_locate_balance_cell_missing_user() {
        assert_eq!(locate_balance_cell(&mock_values(), 999), None);
    }

    #[test]
    fn test_locate_balance_cell_adjacent_fallback() {
        let values = vec![
            vec![json!("Telegram ID"), json!("Amount")],
            vec![json!(111), json!(10)],
        ];
        assert_eq!(locate_balance_cell(&values, 111), Some((2, 2)));
    }

    #[test]
    fn test_locate_balance_cell_without_identifier_column() {
        let values = vec![vec![json!("Name"), json!("Balance")], vec![json!("111"), json!(1)]];
        assert_eq!(locate_balance_cell(&values, 111), None);
    }

    #[test]
    fn test_records_from_values_trims_headers() {
        let values = vec![
            vec![json!(" Telegram ID "), json!("Balance\t")],
            vec![json!("111"), json!("10")],
        ];
        let records = records_from_values(&values);

        assert_eq!(records[0][TELEGRAM_ID_COLUMN], json!("111"));
        assert_eq!(records[0][BALANCE_COLUMN], json!("10"));
        assert_eq!(locate_balance_cell(&values, 111), Some((2, 2)));
    }

    #[test]
    fn test_columns_past_z() {
        let mut header: Vec<Value> = (0..26).map(|i| json!(format!("Note {}", i))).collect();
        header.extend([json!("Telegram ID"), json!("Balance")]);
        let mut row: Vec<Value> = (0..26).map(|_| json!("")).collect();
        row.extend([json!("111"), json!("7")]);
        let values = vec![header, row];

        let records = records_from_values(&values);
        assert_eq!(records[0][TELEGRAM_ID_COLUMN], json!("111"));
        assert_eq!(locate_balance_cell(&values, 111), Some((2, 28)));
        assert_eq!(column_letter(28), "AB");
    }

    #[test]
    fn test_sheet_range_is_unbounded() {
        assert_eq!(sheet_range("Sheet1"), "'Sheet1'");
        assert!(!sheet_range("Sheet1").contains('!'));
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(4), "D");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn test_quoted_sheet() {
        assert_eq!(quoted_sheet("Sheet1"), "'Sheet1'");
        assert_eq!(quoted_sheet("Bob's"), "'Bob''s'");
    }
}
