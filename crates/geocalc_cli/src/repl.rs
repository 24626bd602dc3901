//! Line-driven interactive session.
//!
//! # Responsibility
//! - Parse each input line into exactly one session event.
//! - Dispatch the event to its session transition and print the outcome.
//!
//! # Invariants
//! - A rejected event leaves the session unchanged and keeps the loop running.
//! - Only I/O failures end the loop early.

use geocalc_core::{
    render_history, render_report, sketch_for, CalculationSession, Clock, Operation, ShapeKind,
    ShapeMode, Sketch, PRESET_UNITS,
};
use log::debug;
use std::io::{self, Write};

const HELP: &str = "\
commands:
  mode <2d|3d>          switch shape family
  shape <id>            select a shape of the active family
  op <id>               select an operation of the active family
  set name=value ...    edit form fields
  unit <label>          set the length unit label
  reset                 restore form defaults
  calc                  compute and record the current form
  show                  print the current selection and form
  history               print past calculations
  report                print the last result as a report
  sketch                print the outline of the current result
  help                  print this text
  quit                  leave the session";

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mode(String),
    Shape(String),
    Operation(String),
    Set(String),
    Unit(String),
    Reset,
    Calc,
    Show,
    History,
    Report,
    Sketch,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Event {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };
        match head.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "mode" => Self::Mode(rest.to_string()),
            "shape" => Self::Shape(rest.to_string()),
            "op" | "operation" => Self::Operation(rest.to_string()),
            "set" => Self::Set(rest.to_string()),
            "unit" => Self::Unit(rest.to_string()),
            "reset" => Self::Reset,
            "calc" | "submit" => Self::Calc,
            "show" => Self::Show,
            "history" => Self::History,
            "report" | "export" => Self::Report,
            "sketch" => Self::Sketch,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Reads lines until `quit` or end of input.
pub fn run<C: Clock>(
    lines: impl Iterator<Item = io::Result<String>>,
    out: &mut impl Write,
    session: &mut CalculationSession<C>,
) -> io::Result<()> {
    writeln!(out, "geocalc session; type `help` for commands")?;
    print_selection(out, session)?;
    for line in lines {
        let event = Event::parse(&line?);
        debug!("event=repl_dispatch module=cli kind={}", event_kind(&event));
        if event == Event::Quit {
            break;
        }
        dispatch(event, out, session)?;
    }
    Ok(())
}

/// Applies one event and prints its outcome.
pub fn dispatch<C: Clock>(
    event: Event,
    out: &mut impl Write,
    session: &mut CalculationSession<C>,
) -> io::Result<()> {
    match event {
        Event::Mode(raw) => match ShapeMode::parse(&raw) {
            Ok(mode) => {
                session.set_mode(mode);
                print_selection(out, session)
            }
            Err(err) => writeln!(out, "error: {err}"),
        },
        Event::Shape(raw) => {
            let outcome = ShapeKind::parse(&raw)
                .map_err(|err| err.to_string())
                .and_then(|shape| session.select_shape(shape).map_err(|err| err.to_string()));
            report_outcome(out, session, outcome)
        }
        Event::Operation(raw) => {
            let outcome = Operation::parse(&raw)
                .map_err(|err| err.to_string())
                .and_then(|operation| {
                    session
                        .select_operation(operation)
                        .map_err(|err| err.to_string())
                });
            report_outcome(out, session, outcome)
        }
        Event::Set(text) => {
            let outcome = session
                .apply_assignments(&text)
                .map(|_| ())
                .map_err(|err| err.to_string());
            report_outcome(out, session, outcome)
        }
        Event::Unit(label) => {
            session.set_unit(&label);
            writeln!(out, "unit: {}", display_or_fallback(session.unit()))
        }
        Event::Reset => {
            session.reset_inputs();
            print_selection(out, session)
        }
        Event::Calc => match session.submit() {
            Ok(result) => {
                writeln!(
                    out,
                    "{} {}: {} {}",
                    result.shape,
                    result.operation.label().to_ascii_lowercase(),
                    result.display_value(),
                    result.quantity_unit()
                )?;
                for (index, step) in result.steps.iter().enumerate() {
                    writeln!(out, "  {}. {step}", index + 1)?;
                }
                Ok(())
            }
            Err(err) => writeln!(out, "error: {err}"),
        },
        Event::Show => print_selection(out, session),
        Event::History => write!(out, "{}", render_history(session.history())),
        Event::Report => match session.last_result() {
            Some(result) => write!(out, "{}", render_report(result)),
            None => writeln!(out, "nothing calculated yet"),
        },
        Event::Sketch => match session.current().map(sketch_for) {
            Some(Some(sketch)) => writeln!(out, "{}", describe_sketch(&sketch)),
            Some(None) => writeln!(out, "no outline for these dimensions"),
            None => writeln!(out, "calculate first to see an outline"),
        },
        Event::Help => writeln!(out, "{HELP}"),
        Event::Quit | Event::Empty => Ok(()),
        Event::Unknown(text) => writeln!(out, "unknown command `{text}`; type `help`"),
    }
}

fn report_outcome<C: Clock>(
    out: &mut impl Write,
    session: &CalculationSession<C>,
    outcome: Result<(), String>,
) -> io::Result<()> {
    match outcome {
        Ok(()) => print_selection(out, session),
        Err(message) => writeln!(out, "error: {message}"),
    }
}

fn print_selection<C: Clock>(
    out: &mut impl Write,
    session: &CalculationSession<C>,
) -> io::Result<()> {
    let unit = display_or_fallback(session.unit());
    writeln!(
        out,
        "[{}] {} / {} (unit: {unit})",
        session.mode(),
        session.shape().as_str(),
        session.operation().as_str()
    )?;
    for field in session.fields() {
        let value = session
            .inputs()
            .get(field.dimension)
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "  {} = {value}", field.dimension.as_str())?;
    }
    Ok(())
}

fn display_or_fallback(unit: &str) -> String {
    if unit.is_empty() {
        format!("none; presets: {}", PRESET_UNITS.join(", "))
    } else {
        unit.to_string()
    }
}

fn describe_sketch(sketch: &Sketch) -> String {
    let fmt_points = |points: &[[f64; 2]]| {
        points
            .iter()
            .map(|[x, y]| format!("({x:.2}, {y:.2})"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    match sketch {
        Sketch::Polygon { points, view } => format!(
            "polygon {} in view [{:.2}, {:.2}]..[{:.2}, {:.2}]",
            fmt_points(points),
            view.min[0],
            view.min[1],
            view.max[0],
            view.max[1]
        ),
        Sketch::Circle { radius, .. } => format!("circle radius {radius:.2} at origin"),
        Sketch::Box { vertices } => {
            let far = vertices.iter().fold([0.0_f64; 3], |acc, vertex| {
                [
                    acc[0].max(vertex[0]),
                    acc[1].max(vertex[1]),
                    acc[2].max(vertex[2]),
                ]
            });
            format!(
                "box from (0, 0, 0) to ({:.2}, {:.2}, {:.2})",
                far[0], far[1], far[2]
            )
        }
        Sketch::Sphere { radius } => format!("sphere radius {radius:.2}"),
        Sketch::Cylinder { radius, height } => {
            format!("cylinder radius {radius:.2} height {height:.2}")
        }
    }
}

fn event_kind(event: &Event) -> &'static str {
    match event {
        Event::Mode(_) => "mode",
        Event::Shape(_) => "shape",
        Event::Operation(_) => "operation",
        Event::Set(_) => "set",
        Event::Unit(_) => "unit",
        Event::Reset => "reset",
        Event::Calc => "calc",
        Event::Show => "show",
        Event::History => "history",
        Event::Report => "report",
        Event::Sketch => "sketch",
        Event::Help => "help",
        Event::Quit => "quit",
        Event::Empty => "empty",
        Event::Unknown(_) => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Event};
    use geocalc_core::{CalculationSession, FixedClock, SessionConfig};

    fn script(lines: &[&str]) -> (String, CalculationSession<FixedClock>) {
        let mut session = CalculationSession::with_clock(SessionConfig::default(), FixedClock(0));
        let mut out = Vec::new();
        let input = lines.iter().map(|line| Ok(line.to_string()));
        run(input, &mut out, &mut session).expect("in-memory I/O");
        (String::from_utf8(out).expect("utf-8 output"), session)
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(Event::parse("  shape Circle "), Event::Shape("Circle".to_string()));
        assert_eq!(
            Event::parse("set radius=7 height=2"),
            Event::Set("radius=7 height=2".to_string())
        );
        assert_eq!(Event::parse("CALC"), Event::Calc);
        assert_eq!(Event::parse(""), Event::Empty);
        assert_eq!(Event::parse("fly"), Event::Unknown("fly".to_string()));
    }

    #[test]
    fn scripted_session_computes_and_records_history() {
        let (output, session) = script(&["shape circle", "set radius=7", "calc", "history"]);
        assert!(output.contains("Circle area: 153.94 cm²"), "{output}");
        assert!(output.contains("1. Given Radius = 7 cm"), "{output}");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn rejected_events_keep_the_loop_running() {
        let (output, session) = script(&[
            "shape cube",
            "set side=-4",
            "op volume",
            "bogus",
            "calc",
            "quit",
            "calc",
        ]);
        assert!(output.contains("error: cube is not available in 2d mode"));
        assert!(output.contains("must be >= 0"));
        assert!(output.contains("error: volume is not available in 2d mode"));
        assert!(output.contains("unknown command `bogus`"));
        assert!(output.contains("Square area: 100.00 cm²"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn sketch_and_report_follow_the_last_result() {
        let (output, _) = script(&["sketch", "report", "mode 3d", "calc", "sketch", "report"]);
        assert!(output.contains("calculate first to see an outline"));
        assert!(output.contains("nothing calculated yet"));
        assert!(output.contains("box from (0, 0, 0) to (10.00, 10.00, 10.00)"));
        assert!(output.contains("Result: 1000.00 cm³"));
    }
}
