//! Terminal questions for ambiguous columns.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use uilog_model::{
    AmbiguityResolver, ColumnRole, ColumnSample, EventColumnQuery, ResolveError, RoleQuery,
};

/// Invalid answers tolerated before giving up on a question.
const MAX_ATTEMPTS: usize = 5;

/// Asks the operator on a line-oriented terminal.
///
/// Questions go to `output`, answers are read line by line from `input`.
/// End of input leaves the question unresolved.
pub struct InteractiveResolver<R, W> {
    input: R,
    output: W,
}

impl InteractiveResolver<StdinLock<'static>, Stderr> {
    /// Reads from stdin and writes questions to stderr, keeping stdout free
    /// for the JSON document.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> InteractiveResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the resolver and returns the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self, subject: &str) -> Result<String, ResolveError> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ResolveError::Unresolved {
                subject: format!("{subject} (no answer given)"),
            });
        }
        Ok(line.trim().to_string())
    }

    fn write_column(&mut self, column: &ColumnSample) -> io::Result<()> {
        writeln!(
            self.output,
            "  [{}] {} (unique ratio {:.2}): {}",
            column.index,
            column.header,
            column.unique_ratio,
            column.values.join(", ")
        )
    }
}

impl<R: BufRead, W: Write> AmbiguityResolver for InteractiveResolver<R, W> {
    fn resolve_event_column(&mut self, query: &EventColumnQuery) -> Result<usize, ResolveError> {
        let subject = "event column";
        writeln!(self.output, "Which column holds the event text?")?;
        for column in &query.columns {
            self.write_column(column)?;
        }
        if !query.candidates.is_empty() {
            let candidates: Vec<String> = query
                .candidates
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(
                self.output,
                "Columns starting with an action label: {}",
                candidates.join(", ")
            )?;
        }
        for _ in 0..MAX_ATTEMPTS {
            let answer = self.read_answer(subject)?;
            if let Ok(index) = answer.parse::<usize>()
                && query.columns.iter().any(|c| c.index == index)
            {
                return Ok(index);
            }
            writeln!(self.output, "Enter one of the column numbers in brackets.")?;
        }
        Err(ResolveError::Unresolved {
            subject: subject.to_string(),
        })
    }

    fn resolve_column_role(&mut self, query: &RoleQuery) -> Result<ColumnRole, ResolveError> {
        let subject = format!("role of column '{}'", query.column.header);
        writeln!(self.output, "Which role does this column play?")?;
        self.write_column(&query.column)?;
        for (n, role) in query.allowed.iter().enumerate() {
            writeln!(self.output, "  {}) {role}", n + 1)?;
        }
        for _ in 0..MAX_ATTEMPTS {
            let answer = self.read_answer(&subject)?;
            if let Some(role) = parse_role_answer(&answer, &query.allowed) {
                return Ok(role);
            }
            writeln!(self.output, "Enter a number or one of the listed roles.")?;
        }
        Err(ResolveError::Unresolved { subject })
    }
}

/// Accepts a 1-based position in `allowed` or a role name from `allowed`.
fn parse_role_answer(answer: &str, allowed: &[ColumnRole]) -> Option<ColumnRole> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| allowed.get(i)).copied();
    }
    answer
        .parse::<ColumnRole>()
        .ok()
        .filter(|role| allowed.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_answer_by_number_or_name() {
        let allowed = [ColumnRole::ObjectType, ColumnRole::ContextAttribute];
        assert_eq!(parse_role_answer("2", &allowed), Some(ColumnRole::ContextAttribute));
        assert_eq!(parse_role_answer("object-type", &allowed), Some(ColumnRole::ObjectType));
        assert_eq!(parse_role_answer("0", &allowed), None);
        assert_eq!(parse_role_answer("3", &allowed), None);
        assert_eq!(parse_role_answer("timestamp", &allowed), None);
    }
}
