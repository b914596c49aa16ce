use quiz_types::{CLUE_COUNT, QuestionTile, RoundSnapshot, ViewUpdate};
use std::io::{self, Write};
use tracing::warn;

use crate::config::{Config, ViewFormat};

/// Presentation surface for the list view and the round view.
pub trait View {
    fn show_questions(&mut self, tiles: &[QuestionTile], total_score: i32) -> io::Result<()>;
    fn show_round(&mut self, snapshot: &RoundSnapshot) -> io::Result<()>;
    fn show_load_error(&mut self, message: &str) -> io::Result<()>;
}

pub fn create_view<W: Write + Send + 'static>(config: &Config, out: W) -> Box<dyn View + Send> {
    match config.view_format {
        ViewFormat::Text => Box::new(TextView::new(
            out,
            config.event_title.clone(),
            config.institute_name.clone(),
            config.questions_per_row,
        )),
        ViewFormat::Json => Box::new(JsonView::new(out)),
    }
}

/// Draw the load-error screen. A failed write is logged; the caller exits
/// either way.
pub fn show_load_failure<V: View + ?Sized>(view: &mut V, message: &str) {
    if let Err(e) = view.show_load_error(message) {
        warn!("Failed to draw load error: {}", e);
    }
}

/// Plain terminal rendering.
pub struct TextView<W> {
    out: W,
    event_title: String,
    institute_name: String,
    questions_per_row: usize,
}

impl<W: Write> TextView<W> {
    pub fn new(
        out: W,
        event_title: String,
        institute_name: String,
        questions_per_row: usize,
    ) -> Self {
        Self {
            out,
            event_title,
            institute_name,
            questions_per_row: questions_per_row.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self) -> io::Result<()> {
        // Clear screen, cursor home
        write!(self.out, "\x1b[2J\x1b[H")?;
        writeln!(self.out, "=== {} ===", self.event_title)?;
        writeln!(self.out)
    }

    fn footer(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "--- {} ---", self.institute_name)?;
        self.out.flush()
    }
}

fn tile_label(tile: &QuestionTile) -> String {
    match (tile.is_opened, tile.awarded_score) {
        (false, _) => format!("Question {}", tile.number),
        (true, Some(score)) => format!("{:+}", score),
        (true, None) => String::new(),
    }
}

impl<W: Write> View for TextView<W> {
    fn show_questions(&mut self, tiles: &[QuestionTile], total_score: i32) -> io::Result<()> {
        self.header()?;
        writeln!(self.out, "Quiz Questions")?;
        writeln!(self.out)?;
        for row in tiles.chunks(self.questions_per_row) {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| format!("[{:^14}]", tile_label(tile)))
                .collect();
            writeln!(self.out, "{}", cells.join(" "))?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Total score: {}", total_score)?;
        writeln!(self.out, "Enter a question number to open it, q to quit.")?;
        self.footer()
    }

    fn show_round(&mut self, snapshot: &RoundSnapshot) -> io::Result<()> {
        self.header()?;

        let warning = if snapshot.in_danger_zone { " (!)" } else { "" };
        let penalty = if snapshot.wrong_attempts > 0 {
            format!(" ({})", snapshot.pending_penalty)
        } else {
            String::new()
        };
        writeln!(
            self.out,
            "Question {} | {} | {}{} | Possible Score: {}{}",
            snapshot.question_index + 1,
            snapshot.question_type,
            snapshot.clock(),
            warning,
            snapshot.possible_score,
            penalty
        )?;
        writeln!(self.out)?;

        for clue in 0..CLUE_COUNT {
            match &snapshot.hints[clue] {
                Some(text) => writeln!(self.out, "Clue {}: {}", clue + 1, text)?,
                None => writeln!(self.out, "Clue {}: (press {} to reveal)", clue + 1, clue + 1)?,
            }
        }
        writeln!(self.out)?;

        match &snapshot.outcome {
            Some(outcome) if outcome.is_correct => {
                writeln!(self.out, "Answer: {}", outcome.answer)?;
                writeln!(self.out, "Correct! Score: {:+}", outcome.awarded_score)?;
            }
            Some(outcome) => {
                writeln!(self.out, "Answer: {}", outcome.answer)?;
                writeln!(self.out, "Wrong. Penalty: {}", outcome.penalty)?;
            }
            None => writeln!(self.out, "Answer will appear here")?,
        }

        writeln!(self.out)?;
        if snapshot.is_playing() {
            writeln!(self.out, "1-4 reveal, + correct, - wrong, 0/esc back")?;
        } else {
            writeln!(self.out, "0/esc back to the questions")?;
        }
        self.footer()
    }

    fn show_load_error(&mut self, message: &str) -> io::Result<()> {
        self.header()?;
        writeln!(self.out, "Error Loading Questions")?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", message)?;
        self.footer()
    }
}

/// One JSON `ViewUpdate` per line, for a front end that polls snapshots.
pub struct JsonView<W> {
    out: W,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, update: &ViewUpdate) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, update)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> View for JsonView<W> {
    fn show_questions(&mut self, tiles: &[QuestionTile], total_score: i32) -> io::Result<()> {
        self.emit(&ViewUpdate::QuestionList {
            tiles: tiles.to_vec(),
            total_score,
        })
    }

    fn show_round(&mut self, snapshot: &RoundSnapshot) -> io::Result<()> {
        self.emit(&ViewUpdate::RoundUpdate {
            snapshot: snapshot.clone(),
        })
    }

    fn show_load_error(&mut self, message: &str) -> io::Result<()> {
        self.emit(&ViewUpdate::LoadFailed {
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{QuestionRepository, Round, RoundConfig};

    fn sample_snapshot() -> RoundSnapshot {
        let repository = QuestionRepository::load(
            "Type,Answer,Hint1,Hint2,Hint3,Hint4\nCapital,Paris,Seine,Louvre,Eiffel,Baguette",
        )
        .unwrap();
        let record = repository.get(0).unwrap().clone();
        let (mut round, _) = Round::start(0, record, RoundConfig::default());
        round.reveal(2);
        round.judge(false);
        round.snapshot()
    }

    fn text_view() -> TextView<Vec<u8>> {
        TextView::new(Vec::new(), "Finals".to_string(), "Test Institute".to_string(), 2)
    }

    #[test]
    fn test_text_question_grid() {
        let mut view = text_view();
        let tiles = vec![
            QuestionTile {
                number: 1,
                is_opened: true,
                awarded_score: Some(40),
            },
            QuestionTile {
                number: 2,
                is_opened: true,
                awarded_score: None,
            },
            QuestionTile {
                number: 3,
                is_opened: false,
                awarded_score: None,
            },
        ];
        view.show_questions(&tiles, 40).unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();

        assert!(text.contains("=== Finals ==="));
        assert!(text.contains("+40"));
        assert!(!text.contains("Question 2"));
        assert!(text.contains("Question 3"));
        assert!(text.contains("Total score: 40"));
        assert!(text.contains("--- Test Institute ---"));
        // Two tiles per row
        let grid_rows = text.lines().filter(|line| line.starts_with('[')).count();
        assert_eq!(grid_rows, 2);
    }

    #[test]
    fn test_text_round() {
        let mut view = text_view();
        view.show_round(&sample_snapshot()).unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();

        assert!(text.contains("Capital"));
        assert!(text.contains("01:30"));
        assert!(text.contains("Possible Score: 30 (-10)"));
        assert!(text.contains("Clue 2: Louvre"));
        assert!(text.contains("Clue 1: (press 1 to reveal)"));
        assert!(text.contains("Answer will appear here"));
        assert!(!text.contains("Paris"));
    }

    #[test]
    fn test_text_load_error() {
        let mut view = text_view();
        view.show_load_error("question sheet has no header row").unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("Error Loading Questions"));
        assert!(text.contains("no header row"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_load_failure_survives_broken_output() {
        let mut view = TextView::new(ClosedPipe, "Finals".to_string(), "Test".to_string(), 3);
        assert!(view.show_load_error("no header row").is_err());
        show_load_failure(&mut view, "no header row");

        let mut view = JsonView::new(Vec::new());
        show_load_failure(&mut view, "no header row");
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("no header row"));
    }

    #[test]
    fn test_json_lines() {
        let mut view = JsonView::new(Vec::new());
        view.show_round(&sample_snapshot()).unwrap();
        view.show_load_error("boom").unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let update: ViewUpdate = serde_json::from_str(lines[0]).unwrap();
        match update {
            ViewUpdate::RoundUpdate { snapshot } => {
                assert_eq!(snapshot.revealed_clues, vec![2]);
                assert_eq!(snapshot.wrong_attempts, 1);
            }
            other => panic!("unexpected update {:?}", other),
        }
        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["LoadFailed"]["message"], "boom");
    }
}
