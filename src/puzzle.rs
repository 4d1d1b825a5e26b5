use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PuzzleError {
    #[error("Character grid is empty")]
    EmptyGrid,
    #[error("Character grid row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid coordinate '{0}' in word location")]
    InvalidCoordinate(String),
    #[error("Word location '{0}' does not contain complete x,y pairs")]
    UnpairedCoordinates(String),
    #[error("Cell ({column}, {row}) is outside the character grid")]
    OutOfBounds { column: usize, row: usize },
}

/// A grid position; `column` is the x coordinate and `row` is y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// One placement of the translated word inside the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub word: String,
    pub cells: Vec<Cell>,
}

// Wire shape of one feed line, before validation
#[derive(Debug, Deserialize)]
struct RawPuzzle {
    source_language: String,
    target_language: String,
    word: String,
    character_grid: Vec<Vec<String>>,
    word_locations: BTreeMap<String, String>,
}

/// A word-search challenge: find `word`, translated into the target language,
/// inside a rectangular grid of letters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPuzzle")]
pub struct Puzzle {
    source_language: String,
    target_language: String,
    word: String,
    grid: Vec<Vec<String>>,
    solutions: Vec<Solution>,
}

impl TryFrom<RawPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(raw: RawPuzzle) -> Result<Self, Self::Error> {
        let columns = raw
            .character_grid
            .first()
            .map(Vec::len)
            .filter(|&len| len > 0)
            .ok_or(PuzzleError::EmptyGrid)?;

        for (row, letters) in raw.character_grid.iter().enumerate() {
            if letters.len() != columns {
                return Err(PuzzleError::RaggedGrid {
                    row,
                    expected: columns,
                    found: letters.len(),
                });
            }
        }

        let rows = raw.character_grid.len();
        let solutions = raw
            .word_locations
            .into_iter()
            .map(|(location, word)| {
                let cells = parse_location(&location)?;
                if let Some(cell) = cells.iter().find(|c| c.column >= columns || c.row >= rows) {
                    return Err(PuzzleError::OutOfBounds {
                        column: cell.column,
                        row: cell.row,
                    });
                }
                Ok(Solution { word, cells })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Puzzle {
            source_language: raw.source_language,
            target_language: raw.target_language,
            word: raw.word,
            grid: raw.character_grid,
            solutions,
        })
    }
}

/// Parse a location key such as `"6,1,6,2,6,3"` into `(x, y)` cells.
fn parse_location(location: &str) -> Result<Vec<Cell>, PuzzleError> {
    let coordinates = location
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| PuzzleError::InvalidCoordinate(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if coordinates.len() % 2 != 0 {
        return Err(PuzzleError::UnpairedCoordinates(location.to_string()));
    }

    Ok(coordinates
        .chunks_exact(2)
        .map(|pair| Cell::new(pair[0], pair[1]))
        .collect())
}

impl Puzzle {
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// The prompt word, in the source language.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        // Decoding rejects empty and ragged grids, so every row has this width
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn grid(&self) -> &[Vec<String>] {
        &self.grid
    }

    pub fn letter_at(&self, cell: Cell) -> Option<&str> {
        self.grid
            .get(cell.row)
            .and_then(|letters| letters.get(cell.column))
            .map(String::as_str)
    }

    /// Every accepted placement, ordered by location key.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Concatenate the letters under `cells`, or `None` if any cell is off the grid.
    pub fn spell(&self, cells: &[Cell]) -> Option<String> {
        cells.iter().map(|&cell| self.letter_at(cell)).collect()
    }

    /// Find the solution covered by a player's selection, read in either direction.
    pub fn match_selection(&self, selection: &[Cell]) -> Option<&Solution> {
        self.solutions.iter().find(|solution| {
            solution.cells == selection || solution.cells.iter().rev().eq(selection.iter())
        })
    }
}
