use super::machine::{GameStateMachine, Placement, Transition};
use crate::clock::Clock;
use crate::error::{CfResult, CountyForgeError};
use crate::types::{CountyId, Difficulty, GameMode};
use std::fmt;
use std::str::FromStr;

/// Every input the UI can send to a session, as data.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Start,
    Pause,
    Resume,
    Reset,
    End,
    SetMode(GameMode),
    SetDifficulty(Difficulty),
    Select(Option<CountyId>),
    Highlight(Option<CountyId>),
    Place { county: CountyId, target: CountyId },
    Hint,
    Tick(f64),
    ToggleHints,
    ToggleLabels,
    ToggleSound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Transition(Transition),
    Placement(Placement),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        match self {
            Outcome::Transition(t) => t.is_applied(),
            Outcome::Placement(p) => p != Placement::Ignored,
        }
    }
}

impl<C: Clock> GameStateMachine<C> {
    pub fn dispatch(&mut self, event: GameEvent) -> CfResult<Outcome> {
        let transition = match event {
            GameEvent::Start => self.start_game(),
            GameEvent::Pause => self.pause_game(),
            GameEvent::Resume => self.resume_game(),
            GameEvent::Reset => self.reset_game(),
            GameEvent::End => self.end_game(),
            GameEvent::SetMode(mode) => self.set_mode(mode),
            GameEvent::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            GameEvent::Select(county) => self.select_county(county),
            GameEvent::Highlight(county) => self.highlight_county(county),
            GameEvent::Place { county, target } => {
                return self.place_county(&county, &target).map(Outcome::Placement)
            }
            GameEvent::Hint => self.use_hint(),
            GameEvent::Tick(elapsed) => self.update_timer(elapsed),
            GameEvent::ToggleHints => self.toggle_hints(),
            GameEvent::ToggleLabels => self.toggle_labels(),
            GameEvent::ToggleSound => self.toggle_sound(),
        };
        Ok(Outcome::Transition(transition))
    }
}

fn malformed(message: impl Into<String>) -> CountyForgeError {
    CountyForgeError::Script {
        line: 0,
        message: message.into(),
    }
}

fn optional_county(arg: Option<&str>) -> Option<CountyId> {
    match arg {
        None | Some("none") | Some("-") => None,
        Some(id) => Some(CountyId::from(id)),
    }
}

/// One event per line: `start`, `place orange orange`, `tick 42.5`, `mode timed`.
impl FromStr for GameEvent {
    type Err = CountyForgeError;

    fn from_str(line: &str) -> CfResult<Self> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| malformed("empty event"))?
            .to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let expect_args = |n: usize| {
            if args.len() > n {
                Err(malformed(format!("'{}' takes at most {} argument(s)", verb, n)))
            } else {
                Ok(())
            }
        };

        let event = match verb.as_str() {
            "start" => GameEvent::Start,
            "pause" => GameEvent::Pause,
            "resume" => GameEvent::Resume,
            "reset" => GameEvent::Reset,
            "end" => GameEvent::End,
            "hint" => GameEvent::Hint,
            "toggle-hints" => GameEvent::ToggleHints,
            "toggle-labels" => GameEvent::ToggleLabels,
            "toggle-sound" => GameEvent::ToggleSound,
            "mode" => {
                let arg = args.first().ok_or_else(|| malformed("mode needs a value"))?;
                GameEvent::SetMode(GameMode::parse(arg)?)
            }
            "difficulty" => {
                let arg = args
                    .first()
                    .ok_or_else(|| malformed("difficulty needs a value"))?;
                GameEvent::SetDifficulty(Difficulty::parse(arg)?)
            }
            "select" => GameEvent::Select(optional_county(args.first().copied())),
            "highlight" => GameEvent::Highlight(optional_county(args.first().copied())),
            "place" => match args.as_slice() {
                [county, target] => GameEvent::Place {
                    county: CountyId::from(*county),
                    target: CountyId::from(*target),
                },
                _ => return Err(malformed("place needs <county> <target>")),
            },
            "tick" => {
                let arg = args.first().ok_or_else(|| malformed("tick needs seconds"))?;
                let seconds = arg
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("'{}' is not a number of seconds", arg)))?;
                GameEvent::Tick(seconds)
            }
            other => return Err(malformed(format!("unknown event '{}'", other))),
        };

        let arity = match event {
            GameEvent::Place { .. } => 2,
            GameEvent::SetMode(_)
            | GameEvent::SetDifficulty(_)
            | GameEvent::Select(_)
            | GameEvent::Highlight(_)
            | GameEvent::Tick(_) => 1,
            _ => 0,
        };
        expect_args(arity)?;
        Ok(event)
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let county_or_none = |c: &Option<CountyId>| {
            c.as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "none".to_string())
        };
        match self {
            GameEvent::Start => write!(f, "start"),
            GameEvent::Pause => write!(f, "pause"),
            GameEvent::Resume => write!(f, "resume"),
            GameEvent::Reset => write!(f, "reset"),
            GameEvent::End => write!(f, "end"),
            GameEvent::SetMode(mode) => write!(f, "mode {}", mode),
            GameEvent::SetDifficulty(d) => write!(f, "difficulty {}", d),
            GameEvent::Select(c) => write!(f, "select {}", county_or_none(c)),
            GameEvent::Highlight(c) => write!(f, "highlight {}", county_or_none(c)),
            GameEvent::Place { county, target } => write!(f, "place {} {}", county, target),
            GameEvent::Hint => write!(f, "hint"),
            GameEvent::Tick(s) => write!(f, "tick {}", s),
            GameEvent::ToggleHints => write!(f, "toggle-hints"),
            GameEvent::ToggleLabels => write!(f, "toggle-labels"),
            GameEvent::ToggleSound => write!(f, "toggle-sound"),
        }
    }
}

/// Parses an event script. Blank lines and `#` comments are skipped; errors
/// carry the 1-based line number.
pub fn parse_script(text: &str) -> CfResult<Vec<GameEvent>> {
    text.lines()
        .enumerate()
        .map(|(i, raw)| (i + 1, raw.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            line.parse::<GameEvent>()
                .map_err(|e| CountyForgeError::Script {
                    line: line_no,
                    message: match e {
                        CountyForgeError::Script { message, .. } => message,
                        other => other.to_string(),
                    },
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_verb() {
        assert_eq!("start".parse::<GameEvent>().unwrap(), GameEvent::Start);
        assert_eq!(
            "place orange los-angeles".parse::<GameEvent>().unwrap(),
            GameEvent::Place {
                county: CountyId::from("orange"),
                target: CountyId::from("los-angeles"),
            }
        );
        assert_eq!("tick 42.5".parse::<GameEvent>().unwrap(), GameEvent::Tick(42.5));
        assert_eq!(
            "difficulty HARD".parse::<GameEvent>().unwrap(),
            GameEvent::SetDifficulty(Difficulty::Hard)
        );
        assert_eq!("select none".parse::<GameEvent>().unwrap(), GameEvent::Select(None));
        assert_eq!("toggle-sound".parse::<GameEvent>().unwrap(), GameEvent::ToggleSound);
    }

    #[test]
    fn display_parses_back() {
        for line in ["place kern kern", "mode challenge", "highlight inyo", "hint"] {
            let event: GameEvent = line.parse().unwrap();
            assert_eq!(event.to_string(), line);
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("place orange".parse::<GameEvent>().is_err());
        assert!("tick soon".parse::<GameEvent>().is_err());
        assert!("hint twice".parse::<GameEvent>().is_err());
        assert!("jump".parse::<GameEvent>().is_err());
        assert!(matches!(
            "mode arcade".parse::<GameEvent>(),
            Err(CountyForgeError::UnknownMode(_))
        ));
    }

    #[test]
    fn script_errors_report_line_numbers() {
        let script = "# warm up\nstart\n\nplace a a\nfly away\n";
        match parse_script(script) {
            Err(CountyForgeError::Script { line, message }) => {
                assert_eq!(line, 5);
                assert!(message.contains("fly"));
            }
            other => panic!("expected script error, got {:?}", other),
        }
        assert_eq!(parse_script("start\nhint # free\n").unwrap().len(), 2);
    }
}
