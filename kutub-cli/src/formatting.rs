use std::fmt::Display;

use chrono::{DateTime, Utc, Local, SecondsFormat};

pub enum Float {
    Left,
    Right,
}

pub struct Column {
    name: String,
    width: usize,
    float: Float,
}

impl Column {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>
    {
        let name = name.into();

        Column {
            width: name.chars().count(),
            name,
            float: Float::Left,
        }
    }

    pub fn right<N>(name: N) -> Self
    where
        N: Into<String>
    {
        Column {
            float: Float::Right,
            ..Column::new(name)
        }
    }

    fn write_value<D, O>(&self, value: &D, output: &mut O) -> std::io::Result<()>
    where
        D: Display + ?Sized,
        O: std::io::Write,
    {
        match self.float {
            Float::Left => write!(output, "{value:<width$}", width = self.width),
            Float::Right => write!(output, "{value:>width$}", width = self.width),
        }
    }

    fn update_width(&mut self, width: usize) {
        if width > self.width {
            self.width = width;
        }
    }
}

pub struct TableOptions {
    pub col_sep: &'static str,
    pub header_sep: Option<(char, &'static str)>,
}

pub const PRETTY_OPTIONS: TableOptions = TableOptions {
    col_sep: " | ",
    header_sep: Some(('-', "-+-")),
};

/// column aligned text output with a row counter on the left
pub struct TextTable {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn with_columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = Column>
    {
        TextTable {
            columns: columns.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    /// adds a row, missing trailing values are left blank and extra values
    /// are dropped
    pub fn push<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let mut row: Vec<String> = values.into_iter()
            .take(self.columns.len())
            .map(|v| v.to_string())
            .collect();

        row.resize(self.columns.len(), String::new());

        for (col, value) in self.columns.iter_mut().zip(&row) {
            col.update_width(value.chars().count());
        }

        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn write<O>(&self, output: &mut O, options: &TableOptions) -> std::io::Result<()>
    where
        O: std::io::Write
    {
        let index_width = self.rows.len().max(1).to_string().len() + 1;

        write!(output, "{:index_width$}", "")?;

        for col in &self.columns {
            write!(output, "{}", options.col_sep)?;
            col.write_value(col.name.as_str(), output)?;
        }

        writeln!(output)?;

        if let Some((ch, col_sep)) = options.header_sep {
            write!(output, "{}", ch.to_string().repeat(index_width))?;

            for col in &self.columns {
                write!(output, "{}{}", col_sep, ch.to_string().repeat(col.width))?;
            }

            writeln!(output)?;
        }

        for (index, row) in self.rows.iter().enumerate() {
            write!(output, "{:>index_width$}", index + 1)?;

            for (col, value) in self.columns.iter().zip(row) {
                write!(output, "{}", options.col_sep)?;
                col.write_value(value.as_str(), output)?;
            }

            writeln!(output)?;
        }

        Ok(())
    }

    pub fn print(&self, options: &TableOptions) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();

        self.write(&mut stdout, options)
    }
}

pub fn datetime_to_string(dt: &DateTime<Utc>) -> String {
    DateTime::<Local>::from(*dt).to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aligned_output() {
        let mut table = TextTable::with_columns([
            Column::right("id"),
            Column::new("name"),
        ]);

        table.push(["1", "Navoiy"]);
        table.push(["12", "Qodiriy"]);

        let mut output = Vec::new();
        table.write(&mut output, &PRETTY_OPTIONS).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   | id | name   ");
        assert_eq!(lines[1], "---+----+--------");
        assert_eq!(lines[2], " 1 |  1 | Navoiy ");
        assert_eq!(lines[3], " 2 | 12 | Qodiriy");
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = TextTable::with_columns([Column::new("a"), Column::new("b")]);

        table.push(["only"]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0], vec!["only".to_owned(), String::new()]);
    }
}
