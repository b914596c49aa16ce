use quiz_types::{CLUE_COUNT, QuestionRecord, QuestionTile};
use std::path::Path;
use tracing::info;

use crate::{DataLoadError, RepositoryError};

const TYPE_COLUMN: &str = "Type";
const ANSWER_COLUMN: &str = "Answer";
const HINT_COLUMNS: [&str; CLUE_COUNT] = ["Hint1", "Hint2", "Hint3", "Hint4"];

/// Ordered question records and their play state for one session.
#[derive(Debug, Clone, Default)]
pub struct QuestionRepository {
    records: Vec<QuestionRecord>,
}

/// Position of each required column in the header row.
struct ColumnLayout {
    width: usize,
    question_type: usize,
    answer: usize,
    hints: [usize; CLUE_COUNT],
}

impl ColumnLayout {
    fn from_header(header: &str) -> Result<Self, DataLoadError> {
        let names: Vec<String> = header
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|name| *name == column.to_lowercase())
                .ok_or(DataLoadError::MissingColumn(column))
        };

        let mut hints = [0; CLUE_COUNT];
        for (slot, column) in hints.iter_mut().zip(HINT_COLUMNS) {
            *slot = find(column)?;
        }

        Ok(Self {
            width: names.len(),
            question_type: find(TYPE_COLUMN)?,
            answer: find(ANSWER_COLUMN)?,
            hints,
        })
    }

    fn record(&self, cells: &[&str]) -> QuestionRecord {
        let cell = |index: usize| cells[index].to_string();
        QuestionRecord::new(
            cell(self.question_type),
            cell(self.answer),
            self.hints.map(cell),
        )
    }
}

impl QuestionRepository {
    /// Parse a question sheet: a header row naming the columns, then one
    /// comma-separated row per question.
    pub fn load(raw: &str) -> Result<Self, DataLoadError> {
        let mut lines = raw
            .trim()
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate();

        let header = match lines.next() {
            Some((_, header)) if !header.trim().is_empty() => header,
            _ => return Err(DataLoadError::MissingHeader),
        };
        let layout = ColumnLayout::from_header(header)?;

        let mut records = Vec::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            if cells.len() != layout.width {
                return Err(DataLoadError::ColumnCountMismatch {
                    line: index + 1,
                    expected: layout.width,
                    found: cells.len(),
                });
            }
            records.push(layout.record(&cells));
        }

        info!("Loaded {} questions", records.len());
        Ok(Self { records })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DataLoadError::Unreachable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&raw)
    }

    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn tiles(&self) -> Vec<QuestionTile> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| QuestionTile::from_record(index, record))
            .collect()
    }

    pub fn mark_opened(&mut self, index: usize) -> Result<(), RepositoryError> {
        self.slot(index)?.is_opened = true;
        Ok(())
    }

    /// Overwrite a record with its resolved version.
    pub fn replace(&mut self, index: usize, record: QuestionRecord) -> Result<(), RepositoryError> {
        *self.slot(index)? = record;
        Ok(())
    }

    fn slot(&mut self, index: usize) -> Result<&mut QuestionRecord, RepositoryError> {
        let len = self.records.len();
        self.records
            .get_mut(index)
            .ok_or(RepositoryError::IndexOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "Type,Answer,Hint1,Hint2,Hint3,Hint4\n\
        Capital,Paris,Seine,Louvre,Eiffel,Baguette\n\
        Element,Gold,Au,Yellow,Precious,79\n";

    #[test]
    fn test_load_sheet() {
        let repository = QuestionRepository::load(SHEET).unwrap();
        assert_eq!(repository.len(), 2);

        let first = repository.get(0).unwrap();
        assert_eq!(first.question_type, "Capital");
        assert_eq!(first.answer, "Paris");
        assert_eq!(first.hint(1), Some("Seine"));
        assert_eq!(first.hint(4), Some("Baguette"));
        assert_eq!(first.hint(5), None);
        assert_eq!(first.hint(0), None);
    }

    #[test]
    fn test_loaded_records_start_fresh() {
        let repository = QuestionRepository::load(SHEET).unwrap();
        for record in repository.iter() {
            assert_eq!(record.awarded_score, 0);
            assert_eq!(record.wrong_attempts, 0);
            assert_eq!(record.penalty, 0);
            assert!(!record.is_correct);
            assert!(!record.show_answer);
            assert!(!record.is_opened);
        }
    }

    #[test]
    fn test_header_order_case_and_whitespace() {
        let sheet = "hint4 , HINT3,Hint2,hint1,answer ,TYPE\r\nd,c,b,a,Rome,Capital\r\n";
        let repository = QuestionRepository::load(sheet).unwrap();
        let record = repository.get(0).unwrap();
        assert_eq!(record.question_type, "Capital");
        assert_eq!(record.answer, "Rome");
        assert_eq!(record.hints, ["a", "b", "c", "d"].map(String::from));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let sheet = "Type,Answer,Hint1,Hint2,Hint3,Hint4,Notes\nA,B,1,2,3,4,ignored\n";
        let repository = QuestionRepository::load(sheet).unwrap();
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.get(0).unwrap().hint(4), Some("4"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let sheet = "Type,Answer,Hint1,Hint2,Hint3,Hint4\n\nA,B,1,2,3,4\n   \nC,D,5,6,7,8\n\n";
        let repository = QuestionRepository::load(sheet).unwrap();
        assert_eq!(repository.len(), 2);
    }

    #[test]
    fn test_header_only_is_empty() {
        let repository = QuestionRepository::load("Type,Answer,Hint1,Hint2,Hint3,Hint4").unwrap();
        assert!(repository.is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            QuestionRepository::load(""),
            Err(DataLoadError::MissingHeader)
        ));
        assert!(matches!(
            QuestionRepository::load("  \n \n"),
            Err(DataLoadError::MissingHeader)
        ));
    }

    #[test]
    fn test_missing_column() {
        let result = QuestionRepository::load("Type,Answer,Hint1,Hint2,Hint3\nA,B,1,2,3");
        assert!(matches!(result, Err(DataLoadError::MissingColumn("Hint4"))));
    }

    #[test]
    fn test_column_count_mismatch() {
        let sheet = "Type,Answer,Hint1,Hint2,Hint3,Hint4\nA,B,1,2,3,4\nC,D,5,6\n";
        match QuestionRepository::load(sheet) {
            Err(DataLoadError::ColumnCountMismatch {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 6);
                assert_eq!(found, 4);
            }
            other => panic!("expected column mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_path() {
        let result = QuestionRepository::from_path("/definitely/not/here/questions.csv");
        assert!(matches!(result, Err(DataLoadError::Unreachable { .. })));
        assert!(result.unwrap_err().to_string().contains("questions.csv"));
    }

    #[test]
    fn test_mark_opened_and_replace() {
        let mut repository = QuestionRepository::load(SHEET).unwrap();

        repository.mark_opened(1).unwrap();
        repository.mark_opened(1).unwrap();
        assert!(repository.get(1).unwrap().is_opened);
        assert!(!repository.get(0).unwrap().is_opened);

        let mut resolved = repository.get(1).unwrap().clone();
        resolved.awarded_score = 30;
        resolved.is_correct = true;
        resolved.show_answer = true;
        repository.replace(1, resolved.clone()).unwrap();
        assert_eq!(repository.get(1), Some(&resolved));

        let tiles = repository.tiles();
        assert_eq!(tiles[0].number, 1);
        assert_eq!(tiles[0].awarded_score, None);
        assert_eq!(tiles[1].number, 2);
        assert!(tiles[1].is_opened);
        assert_eq!(tiles[1].awarded_score, Some(30));
    }

    #[test]
    fn test_out_of_range() {
        let mut repository = QuestionRepository::load(SHEET).unwrap();
        assert_eq!(
            repository.mark_opened(2),
            Err(RepositoryError::IndexOutOfRange { index: 2, len: 2 })
        );
        let record = repository.get(0).unwrap().clone();
        assert!(repository.replace(7, record).is_err());
    }
}
