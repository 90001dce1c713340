//! Line-oriented interactive session.
//!
//! Reads one command per line and drives a [`LabSession`]. Input and output
//! are generic so the loop can run against in-memory buffers in tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use morpho_core::response::MATRIX_WORD_SUM;
use morpho_core::text::truncate_str;

use crate::session::{Advance, LabSession, SessionState};

const HELP: &str = "\
commands:
  show                 current task, responses and mediator
  set <field> <text>   write a response field
  toggle <word>        select or unselect a matrix word
  proof <word>         choose the proof word among the selection
  sum <text>           write the word sum for the proof word
  check                check the evidence
  next                 continue to the next task
  score                legacy score of the current responses
  help                 this text
  quit                 leave";

/// Run the loop until `quit`, end of input, or the session finishes.
pub fn run<R: BufRead, W: Write>(session: &mut LabSession, input: R, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "session {} started {}",
        session.id(),
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    show(session, out)?;
    writeln!(out, "type 'help' for commands")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "show" => show(session, out)?,
            "set" => match rest.split_once(' ') {
                Some((field, text)) => report(out, session.set_response(field, text.trim()))?,
                None => writeln!(out, "usage: set <field> <text>")?,
            },
            "sum" => report(out, session.set_response(MATRIX_WORD_SUM, rest))?,
            "toggle" => {
                report(out, session.toggle_word(rest))?;
                writeln!(out, "selected: {}", session.responses().selected_words().join(", "))?;
                writeln!(out, "proof word: {}", session.responses().proof_word())?;
            }
            "proof" => report(out, session.choose_proof_word(rest))?,
            "check" => {
                let _ = session.check();
                mediator(session, out)?;
            }
            "score" => {
                let summary = session.score();
                let tags: Vec<&str> = summary.error_tags.iter().map(|t| t.as_str()).collect();
                writeln!(out, "mastered: {} errors: [{}]", summary.mastered, tags.join(", "))?;
            }
            "next" => match session.advance() {
                Ok(Advance::Moved { from, to }) => {
                    writeln!(out, "{from} -> {to}")?;
                    show(session, out)?;
                }
                Ok(Advance::Blocked) => mediator(session, out)?,
                Ok(Advance::Finished) => {
                    writeln!(out, "{}", session.mediator().status)?;
                    writeln!(out, "completed {} task(s)", session.completed().len())?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            other => writeln!(out, "unknown command '{}'; type 'help'", truncate_str(other, 20))?,
        }

        if *session.state() == SessionState::Finished {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn report<W: Write, E: std::fmt::Display>(out: &mut W, result: Result<(), E>) -> Result<()> {
    match result {
        Ok(()) => writeln!(out, "ok")?,
        Err(err) => writeln!(out, "error: {err}")?,
    }
    Ok(())
}

fn show<W: Write>(session: &LabSession, out: &mut W) -> Result<()> {
    let task = session.task();
    writeln!(out, "== {} ({}) ==", task.id, task.task_type)?;
    if let Some(stem) = task.prompts.as_ref().map(|p| p.stem.trim()).filter(|s| !s.is_empty()) {
        writeln!(out, "{stem}")?;
    }
    for sentence in &task.context.sentences {
        writeln!(out, "  \"{sentence}\"")?;
    }
    for field in &task.response.fields {
        let value = session.responses().get(&field.id);
        writeln!(out, "  [{}] {}: {}", field.id, field.label, value)?;
    }
    if let Some(grid) = session.grid() {
        writeln!(out, "  matrix on <{}>: {}", grid.base, grid.words().join(" "))?;
        writeln!(out, "  selected: {}", session.responses().selected_words().join(", "))?;
        writeln!(out, "  proof word: {}", session.responses().proof_word())?;
        writeln!(out, "  word sum: {}", session.responses().word_sum())?;
    }
    mediator(session, out)
}

fn mediator<W: Write>(session: &LabSession, out: &mut W) -> Result<()> {
    let m = session.mediator();
    writeln!(out, "-- {} --", m.title)?;
    for prompt in &m.prompts {
        writeln!(out, "  * {prompt}")?;
    }
    if !m.status.is_empty() {
        writeln!(out, "{}", m.status)?;
    }
    Ok(())
}
