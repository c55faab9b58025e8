//! Interactive review of jobs the translators have finished.
//!
//! Each reviewable job is shown with its source and target text, and the
//! operator accepts it, sends it back with a comment, or quits the run.

use std::io::{BufRead, Write};

use tracing::info;

use crate::{
    api::{JobAction, TranslationService},
    error::Error,
};

const DECISION_PROMPT: &str = "(a)ccept translation, (r)evise it or (q)uit? ";
const COMMENT_PROMPT: &str = "comment for the translator: ";

/// The operator's answer for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Revise,
    Quit,
}

impl Decision {
    /// Reads the first character of an answer; anything unrecognised,
    /// including leading whitespace, is `None`.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.chars().next()? {
            'a' => Some(Decision::Accept),
            'r' => Some(Decision::Revise),
            'q' => Some(Decision::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Every reviewable job received a decision.
    Finished { approved: usize, revised: usize },
    /// The operator quit; nothing after the quit point was sent.
    Quit,
}

/// Line-oriented operator I/O with a fixed separator width.
pub struct Console<R, W> {
    input: R,
    output: W,
    width: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, width: usize) -> Self {
        Console {
            input,
            output,
            width: width.max(1),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes a full-width separator made of `c`.
    pub fn rule(&mut self, c: char) -> Result<(), Error> {
        let line: String = std::iter::repeat_n(c, self.width).collect();
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn say(&mut self, text: &str) -> Result<(), Error> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Asks a question and returns the answer without its line ending, or
    /// `None` once input is exhausted.
    pub fn prompt(&mut self, question: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        let trimmed = answer.trim_end_matches(['\r', '\n']).len();
        answer.truncate(trimmed);
        Ok(Some(answer))
    }

    fn decide(&mut self) -> Result<Decision, Error> {
        loop {
            match self.prompt(DECISION_PROMPT)? {
                Some(answer) => {
                    if let Some(decision) = Decision::parse(&answer) {
                        return Ok(decision);
                    }
                }
                None => return Ok(Decision::Quit),
            }
        }
    }
}

/// Walks through `job_ids`, showing each job and applying the operator's
/// decision before moving to the next one.
pub fn review_jobs<S, R, W>(
    service: &S,
    job_ids: &[String],
    console: &mut Console<R, W>,
) -> Result<ReviewOutcome, Error>
where
    S: TranslationService + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut approved = 0;
    let mut revised = 0;

    for job_id in job_ids {
        let job = service.job(job_id)?;

        console.rule('=')?;
        console.say(&job.body_src)?;
        console.rule('-')?;
        console.say(&job.body_tgt)?;
        console.rule('-')?;

        match console.decide()? {
            Decision::Quit => {
                info!(%job_id, "review stopped by operator");
                return Ok(ReviewOutcome::Quit);
            }
            Decision::Accept => {
                service.update_job(job_id, &JobAction::Approve)?;
                info!(%job_id, "job approved");
                approved += 1;
            }
            Decision::Revise => {
                let Some(comment) = console.prompt(COMMENT_PROMPT)? else {
                    return Ok(ReviewOutcome::Quit);
                };
                service.update_job(job_id, &JobAction::Revise { comment })?;
                info!(%job_id, "revision requested");
                revised += 1;
            }
        }
        console.say("")?;
    }

    Ok(ReviewOutcome::Finished { approved, revised })
}
