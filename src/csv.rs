// src/csv.rs
use std::io::{self, Write};

/// Field quoting policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Quote {
    /// Every field is wrapped in quotes.
    #[default]
    All,
    /// Only fields containing the separator, quotes or line breaks.
    Minimal,
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char, quote: Quote) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if quote == Quote::All || needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| s!(*c)).collect()
    }

    #[test]
    fn quote_all_wraps_every_field() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row(&["a", "", "c d"]), ',', Quote::All).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"a\",\"\",\"c d\"\n");
    }

    #[test]
    fn minimal_quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row(&["plain", "a,b", "say \"hi\""]), ',', Quote::Minimal).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "plain,\"a,b\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn tsv_separator_is_honored() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row(&["x", "y z"]), '\t', Quote::Minimal).unwrap();
        write_row(&mut buf, &row(&["a\tb", ""]), '\t', Quote::Minimal).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "x\ty z\n\"a\tb\"\t\n");
    }

    #[test]
    fn line_breaks_force_quotes() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row(&["one\ntwo", "x"]), ',', Quote::Minimal).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"one\ntwo\",x\n");
    }
}
