/// One line of the log split on `,`. Well-formed rows carry exactly four cells:
/// `timestamp, description, event kind, process id`.
pub type LogRow = Vec<String>;

/// Split raw log text into rows: lines first, then cells on `,`.
///
/// No cell is trimmed or dropped here; deciding what a row means is left to
/// the event parser. A trailing `\r` is stripped so CRLF logs split the same
/// way as LF logs.
pub fn split_rows(text: &str) -> Vec<LogRow> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_lines_then_cells() {
        let rows = split_rows("00:00:00,Task Start,START,1\n00:01:00,Task End,END,1");
        assert_eq!(
            rows,
            vec![
                vec!["00:00:00", "Task Start", "START", "1"],
                vec!["00:01:00", "Task End", "END", "1"],
            ]
        );
    }

    #[test]
    fn keeps_blank_and_short_lines_as_rows() {
        let rows = split_rows("bad,row\n\n");
        assert_eq!(rows, vec![vec!["bad", "row"], vec![""], vec![""]]);
    }

    #[test]
    fn strips_carriage_returns() {
        let rows = split_rows("00:00:00,a,START,1\r\n00:00:05,b,END,1\r\n");
        assert_eq!(rows[0], vec!["00:00:00", "a", "START", "1"]);
        assert_eq!(rows[1], vec!["00:00:05", "b", "END", "1"]);
    }

    #[test]
    fn keeps_cell_whitespace() {
        let rows = split_rows(" 00:00:00 , a , start , 7 ");
        assert_eq!(rows, vec![vec![" 00:00:00 ", " a ", " start ", " 7 "]]);
    }
}
