/// Event script parser and headless replay
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{one_of, space1, u32 as dec_u32},
    combinator::{all_consuming, map, map_opt, map_res, value, verify},
    number::complete::double,
    sequence::{pair, preceded},
    IResult,
};

use crate::controller::{Button, Mode};
use crate::draw::{DrawnLine, FrameRecorder};
use crate::error::{Result, ViewerError};
use crate::viewer::{ViewDefaults, Viewer};

/// Viewport size a replay starts with until a `size` command says otherwise
pub const DEFAULT_VIEWPORT: (u32, u32) = (300, 300);

/// One line of an event script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Size { width: u32, height: u32 },
    Mode(Mode),
    Press { button: Button, x: f64, y: f64 },
    Release { button: Button, x: f64, y: f64 },
    Motion { x: f64, y: f64 },
    Reset,
    Render,
}

/// A cursor coordinate; `nan` and `inf` are refused
fn coord(input: &str) -> IResult<&str, f64> {
    preceded(space1, verify(double, |v: &f64| v.is_finite()))(input)
}

fn coords(input: &str) -> IResult<&str, (f64, f64)> {
    pair(coord, coord)(input)
}

fn button(input: &str) -> IResult<&str, Button> {
    preceded(
        space1,
        map_opt(one_of("123"), |c| {
            c.to_digit(10).and_then(|d| Button::from_id(d as u8))
        }),
    )(input)
}

fn size(input: &str) -> IResult<&str, ScriptCommand> {
    map(
        preceded(
            tag("size"),
            pair(preceded(space1, dec_u32), preceded(space1, dec_u32)),
        ),
        |(width, height)| ScriptCommand::Size { width, height },
    )(input)
}

fn mode(input: &str) -> IResult<&str, ScriptCommand> {
    map(
        preceded(
            pair(tag("mode"), space1),
            map_res(
                take_while1(|c: char| c.is_ascii_lowercase() || c == '_'),
                str::parse::<Mode>,
            ),
        ),
        ScriptCommand::Mode,
    )(input)
}

fn press(input: &str) -> IResult<&str, ScriptCommand> {
    map(
        preceded(tag("press"), pair(button, coords)),
        |(button, (x, y))| ScriptCommand::Press { button, x, y },
    )(input)
}

fn release(input: &str) -> IResult<&str, ScriptCommand> {
    map(
        preceded(tag("release"), pair(button, coords)),
        |(button, (x, y))| ScriptCommand::Release { button, x, y },
    )(input)
}

fn motion(input: &str) -> IResult<&str, ScriptCommand> {
    map(preceded(tag("motion"), coords), |(x, y)| {
        ScriptCommand::Motion { x, y }
    })(input)
}

fn command(input: &str) -> IResult<&str, ScriptCommand> {
    alt((
        size,
        mode,
        press,
        release,
        motion,
        value(ScriptCommand::Reset, tag("reset")),
        value(ScriptCommand::Render, tag("render")),
    ))(input)
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(input: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (_, cmd) = all_consuming(command)(line).map_err(|e| ViewerError::Script {
            line: index + 1,
            message: format!("cannot parse '{}': {:?}", line, e),
        })?;
        commands.push(cmd);
    }
    Ok(commands)
}

/// Drive a fresh viewer through `commands` and collect every rendered frame.
///
/// Rejected drags are logged and skipped, as in interactive use. A frame that
/// cannot be rendered stops the replay.
pub fn run_script(commands: &[ScriptCommand], defaults: ViewDefaults) -> Result<Vec<Vec<DrawnLine>>> {
    let (width, height) = DEFAULT_VIEWPORT;
    let mut viewer = Viewer::new(defaults, width, height)?;
    let mut recorder = FrameRecorder::new();

    for cmd in commands {
        match *cmd {
            ScriptCommand::Size { width, height } => viewer.resize(width, height),
            ScriptCommand::Mode(mode) => viewer.set_mode(mode),
            ScriptCommand::Press { button, x, y } => viewer.on_button_press(button, x, y),
            ScriptCommand::Release { button, x, y } => viewer.on_button_release(button, x, y),
            ScriptCommand::Motion { x, y } => {
                if let Err(err) = viewer.on_motion(x, y) {
                    log::warn!("replay: motion to ({}, {}) ignored: {}", x, y, err);
                }
            }
            ScriptCommand::Reset => viewer.reset_view()?,
            ScriptCommand::Render => {
                viewer.render(&mut recorder)?;
            }
        }
    }
    log::debug!("replayed {} commands, {} frames", commands.len(), recorder.frames().len());
    Ok(recorder.frames().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Colour;

    #[test]
    fn test_parse_commands() {
        let script = "\
# rotate the model a little
size 640 480
mode model_rotate

press 1 10 20.5
motion 30 20   # drag right
release 1 30 20
reset
render
";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Size {
                    width: 640,
                    height: 480
                },
                ScriptCommand::Mode(Mode::ModelRotate),
                ScriptCommand::Press {
                    button: Button::One,
                    x: 10.0,
                    y: 20.5
                },
                ScriptCommand::Motion { x: 30.0, y: 20.0 },
                ScriptCommand::Release {
                    button: Button::One,
                    x: 30.0,
                    y: 20.0
                },
                ScriptCommand::Reset,
                ScriptCommand::Render,
            ]
        );
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let commands = parse_script("motion -4.5 -1e1").unwrap();
        assert_eq!(commands, vec![ScriptCommand::Motion { x: -4.5, y: -10.0 }]);
    }

    #[test]
    fn test_parse_rejects_non_finite_coordinates() {
        assert!(matches!(
            parse_script("render\nmotion nan 0"),
            Err(ViewerError::Script { line: 2, .. })
        ));
        assert!(parse_script("press 1 inf 3").is_err());
        assert!(parse_script("release 2 4 -infinity").is_err());
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_script("render\n\nmode zoom\n").unwrap_err();
        assert!(matches!(err, ViewerError::Script { line: 3, .. }));

        assert!(matches!(
            parse_script("press 4 1 1"),
            Err(ViewerError::Script { line: 1, .. })
        ));
        assert!(parse_script("render now").is_err());
        assert!(parse_script("size 10").is_err());
    }

    #[test]
    fn test_run_script_renders_frames() {
        let script = "\
render
mode view_perspective
press 3 0 0
motion 200 0
release 3 200 0
render
";
        let frames = run_script(&parse_script(script).unwrap(), ViewDefaults::default()).unwrap();
        assert_eq!(frames.len(), 2);
        // The far face only becomes visible once the far plane moves past it
        let front = |frame: &Vec<DrawnLine>| frame.iter().filter(|l| l.colour == Colour::FRONT).count();
        assert_eq!(front(&frames[0]), 0);
        assert_eq!(front(&frames[1]), 4);
        assert_eq!(frames[1].len(), 16);
    }

    #[test]
    fn test_run_script_reset_matches_first_frame() {
        let script = "\
size 500 400
render
mode model_scale
press 2 0 0
motion -30 0
release 2 0 0
reset
render
";
        let frames = run_script(&parse_script(script).unwrap(), ViewDefaults::default()).unwrap();
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn test_run_script_stops_on_bad_frame() {
        let script = "\
mode view_perspective
press 2 0 0
motion 150 0
render
";
        let result = run_script(&parse_script(script).unwrap(), ViewDefaults::default());
        assert!(matches!(result, Err(ViewerError::InvalidDepthRange { .. })));
    }
}
