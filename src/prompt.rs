use std::io;

pub trait Prompter {
    /// Next input line, or `None` once input is exhausted.
    fn read(&mut self) -> anyhow::Result<Option<String>>;
    fn prompt(&mut self, prompt: &str) -> anyhow::Result<()>;
}

pub struct ConsolePrompter<R: io::BufRead, W: io::Write> {
    reader: R,
    writer: W,
}

impl<R: io::BufRead, W: io::Write> Prompter for ConsolePrompter<R, W> {
    fn read(&mut self) -> anyhow::Result<Option<String>> {
        let mut input = Vec::new();

        if self.reader.read_until(b'\n', &mut input)? == 0 {
            return Ok(None);
        }

        // Invalid UTF-8 is replaced, not fatal.
        return Ok(Some(String::from_utf8_lossy(&input).into_owned()));
    }

    fn prompt(&mut self, prompt: &str) -> anyhow::Result<()> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        return Ok(());
    }
}

impl<R: io::BufRead, W: io::Write> ConsolePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        return ConsolePrompter { reader, writer };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompter() {
        let input = b"ls -l\npwd";
        let mut output = Vec::new();

        let mut prompter = ConsolePrompter::new(input.as_slice(), &mut output);

        prompter.prompt("burrow> ").unwrap();
        let first = prompter.read().unwrap();
        prompter.prompt("burrow> ").unwrap();
        let second = prompter.read().unwrap();
        let end = prompter.read().unwrap();

        let written = String::from_utf8(output).unwrap();

        assert_eq!("burrow> burrow> ", written);
        assert_eq!(Some("ls -l\n".to_string()), first);
        assert_eq!(Some("pwd".to_string()), second);
        assert_eq!(None, end);
    }

    #[test]
    fn invalid_utf8_line_keeps_reading() {
        let input = b"\xff\xfe\npwd\n";
        let mut prompter = ConsolePrompter::new(input.as_slice(), Vec::new());

        assert_eq!(Some("\u{FFFD}\u{FFFD}\n".to_string()), prompter.read().unwrap());
        assert_eq!(Some("pwd\n".to_string()), prompter.read().unwrap());
        assert_eq!(None, prompter.read().unwrap());
    }

    #[test]
    fn reads_long_lines() {
        let line = "x".repeat(10_000);
        let mut prompter = ConsolePrompter::new(line.as_bytes(), Vec::new());

        assert_eq!(Some(line.clone()), prompter.read().unwrap());
    }
}
