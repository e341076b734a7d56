use crossterm::{
    Command, ExecutableCommand,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
};
use log::debug;
use std::io::{self, BufRead, IsTerminal, Write};

/// Asks the operator a single free-text question.
pub trait Prompter {
    /// Returns the answer, or `default` when the operator gives none.
    fn ask(&mut self, question: &str, default: &str) -> anyhow::Result<String>;
}

/// Line-based prompt: the question goes to `output`, the answer is read
/// from `input`. Colors are only emitted when `styled` is set.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    fn style(&mut self, command: impl Command) -> io::Result<()> {
        if self.styled {
            self.output.execute(command)?;
        }
        Ok(())
    }
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        let styled = io::stderr().is_terminal();
        Self::new(io::stdin().lock(), io::stderr()).styled(styled)
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str, default: &str) -> anyhow::Result<String> {
        self.style(SetForegroundColor(Color::Green))?;
        write!(self.output, "? ")?;
        self.style(ResetColor)?;
        self.style(SetAttribute(Attribute::Bold))?;
        write!(self.output, "{}", question)?;
        self.style(SetAttribute(Attribute::Reset))?;
        self.style(SetForegroundColor(Color::DarkGrey))?;
        write!(self.output, " ({})", default)?;
        self.style(ResetColor)?;
        write!(self.output, " ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        let answer = line.trim();

        if read == 0 || answer.is_empty() {
            debug!("No answer given, using default: {}", default);
            return Ok(default.to_string());
        }

        debug!("Operator answered: {}", answer);
        Ok(answer.to_string())
    }
}
