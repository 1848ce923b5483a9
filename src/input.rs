//! Pointer scripts: one pointer event per line.
//!
//! ```text
//! # drag three cells
//! down 30 30
//! move 95 30
//! move 95 95
//! up
//! end
//! ```

use crate::error::ScriptError;
use crate::game::Point;

/// Pointer event from a script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Stop replaying; the session ends here.
    End,
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<PointerEvent>, ScriptError> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let event = match command.to_ascii_lowercase().as_str() {
        "down" | "d" => PointerEvent::Down(point(line_no, command, &mut words)?),
        "move" | "m" => PointerEvent::Move(point(line_no, command, &mut words)?),
        "up" | "u" => PointerEvent::Up,
        "end" | "q" => PointerEvent::End,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line: line_no,
                command: command.to_string(),
            });
        }
    };
    Ok(Some(event))
}

fn point<'a>(
    line_no: usize,
    command: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, ScriptError> {
    let mut coord = || -> Result<f32, ScriptError> {
        let word = words.next().ok_or_else(|| ScriptError::MissingCoordinate {
            line: line_no,
            command: command.to_string(),
        })?;
        word.parse::<f32>().map_err(|_| ScriptError::BadNumber {
            line: line_no,
            value: word.to_string(),
        })
    };
    let x = coord()?;
    let y = coord()?;
    Ok(Point::new(x, y))
}

/// Parse a whole script. Line numbers in errors start at 1.
pub fn parse_script(text: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(ev) = parse_line(i + 1, line)? {
            events.push(ev);
        }
    }
    Ok(events)
}
