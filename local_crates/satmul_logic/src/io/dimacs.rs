// satmul_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::{ClauseSet, Literal, Model};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read, Write};

/// A writer for the DIMACS CNF format.
///
/// The output is made of optional comment lines (`c ...`), the problem line (`p cnf <vars> <clauses>`)
/// and one line per clause, each one terminated by `0`.
///
/// # Example
///
/// ```
/// use satmul_logic::{ClauseSet, DimacsWriter, Literal};
///
/// let mut clauses = ClauseSet::default();
/// clauses.insert(vec![Literal::from((1, true)), Literal::from((2, false))]);
/// let mut writer = DimacsWriter::new();
/// writer.add_comment("an example");
/// let mut out = Vec::new();
/// writer.write(2, &clauses, &mut out).unwrap();
/// assert_eq!("c an example\np cnf 2 1\n1 -2 0\n", String::from_utf8(out).unwrap());
/// ```
#[derive(Default)]
pub struct DimacsWriter {
    comments: Vec<String>,
}

impl DimacsWriter {
    /// Creates a new `DimacsWriter` with no comments.
    pub fn new() -> Self {
        DimacsWriter::default()
    }

    /// Adds a comment to write before the problem line.
    ///
    /// Multi-line comments are written as several comment lines.
    pub fn add_comment(&mut self, comment: &str) {
        self.comments
            .extend(comment.lines().map(|l| l.to_string()));
    }

    /// Writes a set of clauses to the provided writer.
    ///
    /// The number of variables written in the problem line is the maximum
    /// of `n_vars` and the highest variable of the clauses.
    pub fn write(&self, n_vars: usize, clauses: &ClauseSet, writer: &mut dyn Write) -> Result<()> {
        for comment in &self.comments {
            if comment.is_empty() {
                writeln!(writer, "c")?;
            } else {
                writeln!(writer, "c {}", comment)?;
            }
        }
        writeln!(
            writer,
            "p cnf {} {}",
            std::cmp::max(n_vars, clauses.n_vars()),
            clauses.len()
        )?;
        for clause in clauses.iter() {
            for literal in clause.as_literals() {
                write!(writer, "{} ", literal)?;
            }
            writeln!(writer, "0")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes a model as a solution line (`v <lit> ... 0`).
    pub fn write_model(&self, model: &Model, writer: &mut dyn Write) -> Result<()> {
        write!(writer, "v")?;
        for literal in model.as_literals() {
            write!(writer, " {}", literal)?;
        }
        writeln!(writer, " 0")?;
        writer.flush()?;
        Ok(())
    }
}

/// A problem read from a DIMACS CNF file.
#[derive(Debug, PartialEq, Eq)]
pub struct DimacsInstance {
    n_vars: usize,
    clauses: Vec<Vec<Literal>>,
}

impl DimacsInstance {
    /// Returns the number of variables declared in the problem line.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the clauses, in the order of the file.
    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }
}

/// A reader for the DIMACS CNF format.
///
/// Comment lines (beginning with `c`) and empty lines are ignored.
/// Clauses may span several lines; a clause is terminated by `0`.
/// The numbers of variables and clauses must be consistent with the problem line.
#[derive(Default)]
pub struct DimacsReader;

impl DimacsReader {
    /// Reads a DIMACS CNF instance.
    ///
    /// # Example
    ///
    /// ```
    /// use satmul_logic::DimacsReader;
    ///
    /// let content = "c a comment\np cnf 3 2\n1 -2 0\n3\n0\n";
    /// let instance = DimacsReader::default().read(&mut content.as_bytes()).unwrap();
    /// assert_eq!(3, instance.n_vars());
    /// assert_eq!(2, instance.clauses().len());
    /// ```
    pub fn read(&self, reader: &mut dyn Read) -> Result<DimacsInstance> {
        let br = BufReader::new(reader);
        let mut header: Option<(usize, usize)> = None;
        let mut clauses = Vec::new();
        let mut current = Vec::new();
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line {}", i);
            let line = line.with_context(context)?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            if trimmed.starts_with('p') {
                if header.is_some() {
                    return Err(anyhow!("multiple problem lines")).with_context(context);
                }
                header = Some(read_problem_line(trimmed).with_context(context)?);
                continue;
            }
            let n_vars = match header {
                Some((n, _)) => n,
                None => {
                    return Err(anyhow!("clauses must follow the problem line"))
                        .with_context(context)
                }
            };
            for word in trimmed.split_whitespace() {
                let literal = read_literal(word, n_vars).with_context(context)?;
                match literal {
                    Some(l) => current.push(l),
                    None => clauses.push(std::mem::take(&mut current)),
                }
            }
        }
        if !current.is_empty() {
            clauses.push(current);
        }
        let (n_vars, n_clauses) = header.ok_or_else(|| anyhow!("missing problem line"))?;
        if clauses.len() != n_clauses {
            return Err(anyhow!(
                "the problem line declares {} clause(s), but {} were found",
                n_clauses,
                clauses.len()
            ));
        }
        Ok(DimacsInstance { n_vars, clauses })
    }
}

fn read_problem_line(line: &str) -> Result<(usize, usize)> {
    let words = line.split_whitespace().collect::<Vec<&str>>();
    if words.len() != 4 || words[0] != "p" || words[1] != "cnf" {
        return Err(anyhow!(r#"expected "p cnf <vars> <clauses>", got "{}""#, line));
    }
    let parse = |w: &str| {
        w.parse::<usize>()
            .map_err(|_| anyhow!(r#"invalid number "{}" in problem line"#, w))
    };
    Ok((parse(words[2])?, parse(words[3])?))
}

fn read_literal(word: &str, n_vars: usize) -> Result<Option<Literal>> {
    let value = word
        .parse::<i32>()
        .map_err(|_| anyhow!(r#"invalid literal "{}""#, word))?;
    let literal = Literal::from_dimacs(value);
    if let Some(l) = literal {
        if usize::from(l.var_id()) > n_vars {
            return Err(anyhow!(
                "literal {} refers to an undeclared variable (the problem has {})",
                l,
                n_vars
            ));
        }
    }
    Ok(literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    fn assert_err_message(expected_chain: Vec<&'static str>, actual: Error) {
        let error_chain: Vec<String> = actual.chain().map(|e| format!("{}", e)).collect();
        assert_eq!(expected_chain, error_chain);
    }

    fn read(content: &str) -> Result<DimacsInstance> {
        DimacsReader::default().read(&mut content.as_bytes())
    }

    fn lits(v: &[i32]) -> Vec<Literal> {
        v.iter().map(|i| Literal::from_dimacs(*i).unwrap()).collect()
    }

    #[test]
    fn test_write_multiline_comment() {
        let mut writer = DimacsWriter::new();
        writer.add_comment("first\n\nthird");
        let mut clauses = ClauseSet::default();
        clauses.insert(lits(&[3]));
        let mut out = Vec::new();
        writer.write(0, &clauses, &mut out).unwrap();
        assert_eq!(
            "c first\nc\nc third\np cnf 3 1\n3 0\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        DimacsWriter::new()
            .write(4, &ClauseSet::default(), &mut out)
            .unwrap();
        assert_eq!("p cnf 4 0\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_write_model() {
        let mut out = Vec::new();
        DimacsWriter::new()
            .write_model(&Model::new(lits(&[2, -1])), &mut out)
            .unwrap();
        assert_eq!("v -1 2 0\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_read_ok() {
        let instance = read("c comment\n\np cnf 3 3\n1 -2 0 2\n3 0\n-1 0").unwrap();
        assert_eq!(3, instance.n_vars());
        assert_eq!(
            &[lits(&[1, -2]), lits(&[2, 3]), lits(&[-1])],
            instance.clauses()
        );
    }

    #[test]
    fn test_read_invalid_literal() {
        assert_err_message(
            vec!["while reading line 2", r#"invalid literal "x""#],
            read("p cnf 2 1\n1 0\n2 x 0\n").unwrap_err(),
        );
    }

    #[test]
    fn test_read_undeclared_var() {
        assert_err_message(
            vec![
                "while reading line 1",
                "literal -3 refers to an undeclared variable (the problem has 2)",
            ],
            read("p cnf 2 1\n-3 0\n").unwrap_err(),
        );
    }

    #[test]
    fn test_read_missing_header() {
        assert_err_message(
            vec![
                "while reading line 0",
                "clauses must follow the problem line",
            ],
            read("1 2 0\n").unwrap_err(),
        );
        assert_err_message(vec!["missing problem line"], read("c nothing\n").unwrap_err());
    }

    #[test]
    fn test_read_bad_header() {
        assert_err_message(
            vec![
                "while reading line 0",
                r#"expected "p cnf <vars> <clauses>", got "p dnf 2 1""#,
            ],
            read("p dnf 2 1\n").unwrap_err(),
        );
        assert_err_message(
            vec!["while reading line 1", "multiple problem lines"],
            read("p cnf 2 1\np cnf 2 1\n").unwrap_err(),
        );
    }

    #[test]
    fn test_read_wrong_clause_count() {
        assert_err_message(
            vec!["the problem line declares 2 clause(s), but 1 were found"],
            read("p cnf 2 2\n1 2 0\n").unwrap_err(),
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut clauses = ClauseSet::default();
        clauses.insert(lits(&[1, -2]));
        clauses.insert(lits(&[-3]));
        let mut out = Vec::new();
        DimacsWriter::new().write(3, &clauses, &mut out).unwrap();
        let instance = read(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(
            clauses
                .iter()
                .map(|c| c.as_literals().to_vec())
                .collect::<Vec<Vec<Literal>>>(),
            instance.clauses()
        );
    }
}
