use super::{ImportError, SourceRow, SourceTable};
use encoding_rs::SHIFT_JIS;

/// Decodes delimited-text bytes: UTF-8 (BOM stripped) first, then Shift_JIS as written by
/// Japanese spreadsheet exports.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<String, ImportError> {
    let without_bom = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return Ok(text.to_string());
    }

    let (decoded, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(ImportError::Encoding);
    }
    Ok(decoded.into_owned())
}

/// Picks the delimiter producing the most consistent multi-field rows in the first lines.
pub(crate) fn sniff_delimiter(content: &str) -> u8 {
    let candidates: [u8; 3] = [b',', b'\t', b';'];
    let sample: Vec<&str> = content.lines().take(10).collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for delimiter in candidates {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delimiter)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|record| record.ok())
                    .map(|record| record.len())
                    .unwrap_or(1)
            })
            .collect();

        let Some(&first) = counts.first() else {
            continue;
        };
        if first <= 1 {
            continue;
        }

        let consistent = counts.iter().filter(|&&count| count == first).count();
        let score = consistent * first;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }

    best
}

/// Line a record starts on. The reader stamps a record with the position reached after the
/// previous one, before any blank lines in between are skipped.
fn starting_line(content: &str, position: &csv::Position) -> usize {
    let skipped = content
        .as_bytes()
        .get(position.byte() as usize..)
        .unwrap_or_default()
        .iter()
        .take_while(|&&byte| byte == b'\n' || byte == b'\r')
        .filter(|&&byte| byte == b'\n')
        .count();
    position.line() as usize + skipped
}

/// Header row and data rows of a delimited export. Short rows are padded with blanks and
/// each row is numbered by the line it starts on; blank lines are skipped.
pub(crate) fn parse_table(content: &str) -> Result<SourceTable, ImportError> {
    let delimiter = sniff_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(ImportError::MissingHeader),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let number = record
            .position()
            .map_or(rows.len() + 2, |position| starting_line(content, position));
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len().max(cells.len()), String::new());
        rows.push(SourceRow { number, cells });
    }

    Ok((headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_with_bom() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice("職種\n".as_bytes());
        assert_eq!(decode_text(&bytes).expect("utf-8"), "職種\n");
    }

    #[test]
    fn falls_back_to_shift_jis() {
        let (encoded, _, had_errors) = SHIFT_JIS.encode("雇用形態,職種\n正社員,営業\n");
        assert!(!had_errors);
        assert_eq!(
            decode_text(&encoded).expect("shift_jis"),
            "雇用形態,職種\n正社員,営業\n"
        );
    }

    #[test]
    fn undecodable_bytes_are_an_encoding_error() {
        assert!(matches!(
            decode_text(&[0x82, 0xFF, 0xFF, 0x80]),
            Err(ImportError::Encoding)
        ));
    }

    #[test]
    fn sniffs_tab_and_semicolon_delimiters() {
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3\n"), b'\t');
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("single\n"), b',');
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let (headers, rows) = parse_table("a,b,c\n1,2\n").expect("parse");
        assert_eq!(headers, vec!["a", "b", "c"]);
        assert_eq!(
            rows,
            vec![SourceRow {
                number: 2,
                cells: vec!["1".to_string(), "2".to_string(), String::new()],
            }]
        );
    }

    #[test]
    fn rows_are_numbered_by_their_starting_line() {
        let (_, rows) = parse_table("a,b\n1,\"x\ny\"\n\n3,4\n").expect("parse");
        let numbers: Vec<usize> = rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![2, 5]);

        let (_, rows) = parse_table("a,b\r\n1,2\r\n\r\n\r\n3,4\r\n").expect("parse");
        let numbers: Vec<usize> = rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![2, 5]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(parse_table(""), Err(ImportError::MissingHeader)));
    }
}
