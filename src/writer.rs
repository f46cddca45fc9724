use std::io::{self, BufWriter, Write};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const STMT_BUFFER_COUNT: usize = 100;

/// Pass-through writer that counts bytes accepted by the inner sink
pub struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Buffered sink for SQL statements and comments.
///
/// Every statement is terminated by a newline; the buffer is flushed every
/// `STMT_BUFFER_COUNT` statements.
pub struct StatementWriter<W: Write> {
    writer: BufWriter<CountingWriter<W>>,
    write_count: usize,
    max_stmt_buffer: usize,
    statements: u64,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(WRITER_BUFFER_SIZE, CountingWriter::new(inner)),
            write_count: 0,
            max_stmt_buffer: STMT_BUFFER_COUNT,
            statements: 0,
        }
    }

    pub fn write_statement(&mut self, stmt: &str) -> io::Result<()> {
        self.writer.write_all(stmt.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.statements += 1;

        self.write_count += 1;
        if self.write_count >= self.max_stmt_buffer {
            self.write_count = 0;
            self.writer.flush()?;
        }

        Ok(())
    }

    /// Write a `-- ` comment line; not counted as a statement
    pub fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(b"-- ")?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.write_count = 0;
        self.writer.flush()
    }

    pub fn statements(&self) -> u64 {
        self.statements
    }

    /// Flush and return the inner sink with the total byte count
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        self.flush()?;
        let counting = self.writer.into_inner().map_err(|e| e.into_error())?;
        let bytes = counting.bytes();
        Ok((counting.into_inner(), bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_and_comments() {
        let mut writer = StatementWriter::new(Vec::new());
        writer.write_comment("header").unwrap();
        writer.write_statement("SET FOREIGN_KEY_CHECKS = 0;").unwrap();
        writer.blank_line().unwrap();
        writer.write_statement("TRUNCATE TABLE products;").unwrap();

        assert_eq!(writer.statements(), 2);
        let (buf, bytes) = writer.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "-- header\nSET FOREIGN_KEY_CHECKS = 0;\n\nTRUNCATE TABLE products;\n"
        );
        assert_eq!(bytes, text.len() as u64);
    }

    #[test]
    fn test_flush_after_buffer_count() {
        let mut writer = StatementWriter::new(Vec::new());
        for i in 0..STMT_BUFFER_COUNT {
            writer
                .write_statement(&format!("INSERT INTO t VALUES ({});", i))
                .unwrap();
        }
        let (buf, _) = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().lines().count(),
            STMT_BUFFER_COUNT
        );
    }
}
