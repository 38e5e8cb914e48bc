//! Line-oriented prompting on standard input and output.
//!
//! Each prompt prints its label without a line break, flushes, then reads a
//! single line. Numeric, boolean and date answers are trimmed before parsing;
//! text answers keep everything except the line terminator.

use crate::{
    Result,
    catalog::{PromptSpec, ValueKind},
    error::YatvError,
};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use zeroize::Zeroizing;

/// A typed answer to one prompt
#[derive(Clone)]
pub enum Answer {
    /// [`ValueKind::Text`]
    Text(String),
    /// [`ValueKind::Password`]
    Secret(Zeroizing<String>),
    /// [`ValueKind::Integer`]
    Integer(i64),
    /// [`ValueKind::Count`]
    Count(u32),
    /// [`ValueKind::Decimal`]
    Decimal(f32),
    /// [`ValueKind::Boolean`]
    Boolean(bool),
    /// [`ValueKind::Date`]
    Date(NaiveDate),
}

impl std::fmt::Debug for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Secret(_) => f.write_str("Secret(..)"),
            Self::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            Self::Count(v) => f.debug_tuple("Count").field(v).finish(),
            Self::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
            Self::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Self::Date(v) => f.debug_tuple("Date").field(v).finish(),
        }
    }
}

impl Answer {
    /// Text value, if this is a text answer
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Secret value, if this is a password answer
    pub fn into_secret(self) -> Option<Zeroizing<String>> {
        match self {
            Self::Secret(v) => Some(v),
            _ => None,
        }
    }

    /// Integer value, if this is an integer answer
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Count value, if this is a count answer
    pub const fn as_count(&self) -> Option<u32> {
        match self {
            Self::Count(v) => Some(*v),
            _ => None,
        }
    }

    /// Decimal value, if this is a decimal answer
    pub const fn as_decimal(&self) -> Option<f32> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean answer
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Date value, if this is a date answer
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }
}

/// Prompt reader over any buffered input and writable output.
///
/// # Example
/// ```rust
/// use std::io::Cursor;
/// use yatv_core::catalog::prompts;
/// use yatv_core::console::Console;
///
/// let mut console = Console::new(Cursor::new("7\n"), Vec::new());
/// assert_eq!(console.ask_i64(&prompts::SHOW_ID)?, 7);
/// assert_eq!(console.into_output(), b"Enter the ShowID: ");
/// # Ok::<(), yatv_core::YatvError>(())
/// ```
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console bound to the process's standard streams
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the console and returns its output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes text as-is and flushes.
    ///
    /// # Errors
    /// Returns error if the output stream fails
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| YatvError::io("writing to console", e))
    }

    /// Reads one answer of the prompt's value kind.
    ///
    /// # Errors
    /// Returns error if input is exhausted, unreadable or does not parse
    pub fn ask(&mut self, prompt: &PromptSpec) -> Result<Answer> {
        Ok(match prompt.kind {
            ValueKind::Text => Answer::Text(self.ask_text(prompt)?),
            ValueKind::Password => Answer::Secret(self.ask_password(prompt)?),
            ValueKind::Integer => Answer::Integer(self.ask_i64(prompt)?),
            ValueKind::Count => Answer::Count(self.ask_u32(prompt)?),
            ValueKind::Decimal => Answer::Decimal(self.ask_f32(prompt)?),
            ValueKind::Boolean => Answer::Boolean(self.ask_bool(prompt)?),
            ValueKind::Date => Answer::Date(self.ask_date(prompt)?),
        })
    }

    /// Reads one line of free text.
    ///
    /// # Errors
    /// Returns error if input is exhausted or unreadable
    pub fn ask_text(&mut self, prompt: &PromptSpec) -> Result<String> {
        let line = self.read_answer(prompt)?;
        Ok(line.as_str().to_owned())
    }

    /// Reads a secret without keeping a non-zeroizing copy.
    ///
    /// # Errors
    /// Returns error if input is exhausted or unreadable
    pub fn ask_password(&mut self, prompt: &PromptSpec) -> Result<Zeroizing<String>> {
        let line = self.read_answer(prompt)?;
        Ok(Zeroizing::new(line.as_str().to_owned()))
    }

    /// Reads a signed integer.
    ///
    /// # Errors
    /// Returns error if the answer is not an integer
    pub fn ask_i64(&mut self, prompt: &PromptSpec) -> Result<i64> {
        self.ask_parsed(prompt, |raw| raw.parse::<i64>().map_err(|e| e.to_string()))
    }

    /// Reads a non-negative integer.
    ///
    /// # Errors
    /// Returns error if the answer is not a non-negative integer
    pub fn ask_u32(&mut self, prompt: &PromptSpec) -> Result<u32> {
        self.ask_parsed(prompt, |raw| raw.parse::<u32>().map_err(|e| e.to_string()))
    }

    /// Reads a decimal number.
    ///
    /// # Errors
    /// Returns error if the answer is not a finite number
    pub fn ask_f32(&mut self, prompt: &PromptSpec) -> Result<f32> {
        self.ask_parsed(prompt, |raw| {
            let value = raw.parse::<f32>().map_err(|e| e.to_string())?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err("number must be finite".to_string())
            }
        })
    }

    /// Reads `true` or `false` in any letter case.
    ///
    /// # Errors
    /// Returns error for any other answer
    pub fn ask_bool(&mut self, prompt: &PromptSpec) -> Result<bool> {
        self.ask_parsed(prompt, parse_bool)
    }

    /// Reads a calendar date as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Returns error if the answer is not a valid date
    pub fn ask_date(&mut self, prompt: &PromptSpec) -> Result<NaiveDate> {
        self.ask_parsed(prompt, |raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| e.to_string())
        })
    }

    fn ask_parsed<T>(
        &mut self,
        prompt: &PromptSpec,
        parse: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let line = self.read_answer(prompt)?;
        let raw = line.trim();
        parse(raw).map_err(|reason| YatvError::invalid_input(prompt.field, raw, reason))
    }

    /// Prints the label, then reads one line without its terminator.
    fn read_answer(&mut self, prompt: &PromptSpec) -> Result<Zeroizing<String>> {
        self.print(prompt.label)?;

        let mut line = Zeroizing::new(String::new());
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| YatvError::io(format!("reading {}", prompt.field), e))?;
        if read == 0 {
            return Err(YatvError::end_of_input(prompt.field));
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected true or false".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::prompts;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_label_written_before_read() {
        let mut console = console("Ada\n");
        let name = console.ask_text(&prompts::FIRST_NAME).unwrap();

        assert_eq!(name, "Ada");
        assert_eq!(console.into_output(), b"Enter Your First Name: ");
    }

    #[test]
    fn test_text_keeps_inner_whitespace() {
        let mut console = console("  The Long Night \r\n");
        let title = console.ask_text(&prompts::VIDEO_TITLE).unwrap();
        assert_eq!(title, "  The Long Night ");
    }

    #[test]
    fn test_numbers_are_trimmed() {
        let mut console = console(" 42 \n3\n2.5\n");
        assert_eq!(console.ask_i64(&prompts::SHOW_ID).unwrap(), 42);
        assert_eq!(console.ask_u32(&prompts::MONTHS).unwrap(), 3);
        assert!((console.ask_f32(&prompts::VERSION).unwrap() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_integer_reports_field_and_input() {
        let mut console = console("twelve\n");
        let error = console.ask_i64(&prompts::SHOW_ID).unwrap_err();

        assert!(matches!(error, YatvError::InvalidInput { .. }));
        let message = error.to_string();
        assert!(message.contains("show id"));
        assert!(message.contains("twelve"));
    }

    #[test]
    fn test_negative_months_rejected() {
        let mut console = console("-2\n");
        assert!(console.ask_u32(&prompts::MONTHS).is_err());
    }

    #[test]
    fn test_booleans_case_insensitive() {
        let mut console = console("True\nFALSE\nyes\n");
        assert!(console.ask_bool(&prompts::SUBSCRIPTION_REQUIRED).unwrap());
        assert!(!console.ask_bool(&prompts::SUBSCRIPTION_REQUIRED).unwrap());
        assert!(console.ask_bool(&prompts::SUBSCRIPTION_REQUIRED).is_err());
    }

    #[test]
    fn test_dates() {
        let mut console = console("2020-06-01\n2020-13-01\n");
        assert_eq!(
            console.ask_date(&prompts::RELEASE_DATE).unwrap(),
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
        );
        assert!(console.ask_date(&prompts::RELEASE_DATE).is_err());
    }

    #[test]
    fn test_end_of_input() {
        let mut console = console("");
        let error = console.ask_text(&prompts::COUNTRY).unwrap_err();
        assert!(matches!(error, YatvError::EndOfInput { .. }));
    }

    #[test]
    fn test_password_read_into_zeroizing_buffer() {
        let mut console = console("s3cret\n");
        let password = console.ask_password(&prompts::PASSWORD).unwrap();
        assert_eq!(password.as_str(), "s3cret");
    }

    #[test]
    fn test_ask_dispatches_on_value_kind() {
        let mut console = console("7\n4\nfalse\n2021-02-03\npw\n");

        assert_eq!(console.ask(&prompts::SHOW_ID).unwrap().as_integer(), Some(7));
        assert_eq!(console.ask(&prompts::MONTHS).unwrap().as_count(), Some(4));
        assert_eq!(
            console.ask(&prompts::SUBSCRIPTION_REQUIRED).unwrap().as_boolean(),
            Some(false)
        );
        assert_eq!(
            console.ask(&prompts::RELEASE_DATE).unwrap().as_date(),
            NaiveDate::from_ymd_opt(2021, 2, 3)
        );

        let secret = console.ask(&prompts::PASSWORD).unwrap();
        assert_eq!(format!("{secret:?}"), "Secret(..)");
        assert_eq!(secret.into_secret().unwrap().as_str(), "pw");
    }

    #[test]
    fn test_non_finite_version_rejected() {
        let mut console = console("NaN\n");
        assert!(console.ask_f32(&prompts::VERSION).is_err());
    }
}
