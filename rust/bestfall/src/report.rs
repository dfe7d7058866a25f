use crate::engine::SeekOutcome;
use crate::errors::BestFallError;
use crate::grid::ElevationGrid;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;

/// One cell of the winning fall, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub label: String,
    pub row: usize,
    pub col: usize,
    pub elevation: i32,
}

/// Presentation-ready summary of a finished search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallReport {
    pub steps: usize,
    pub drop: i64,
    pub start_elevation: i32,
    pub end_elevation: i32,
    pub elapsed_seconds: f64,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub paths_evaluated: usize,
    pub coordinates: Vec<StepReport>,
}

fn step_label(i: usize, len: usize) -> String {
    if i == 0 {
        "Start".to_string()
    } else if i == len - 1 {
        "Finally".to_string()
    } else {
        format!("Step {}", i)
    }
}

impl FallReport {
    /// Builds the report, `None` when the search found no fall at all.
    pub fn from_outcome(
        outcome: &SeekOutcome,
        grid: &ElevationGrid,
    ) -> Result<Option<Self>, BestFallError> {
        let Some(best) = outcome.best.as_ref() else {
            return Ok(None);
        };
        let len = best.steps();
        let coordinates = best
            .coords()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Ok(StepReport {
                    label: step_label(i, len),
                    row: c.row,
                    col: c.col,
                    elevation: grid.value_at(*c)?,
                })
            })
            .collect::<Result<Vec<_>, BestFallError>>()?;

        Ok(Some(Self {
            steps: len,
            drop: best.drop,
            start_elevation: best.start_elevation,
            end_elevation: best.end_elevation,
            elapsed_seconds: outcome.elapsed.as_secs_f64(),
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            paths_evaluated: outcome.paths_evaluated,
            coordinates,
        }))
    }
}

impl Display for FallReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Best fall:")?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(f, "Drop: {}", self.drop)?;
        writeln!(f, "Elapsed: {:.2} seconds", self.elapsed_seconds)?;
        writeln!(
            f,
            "Evaluated {} falls on a {}x{} grid",
            self.paths_evaluated, self.grid_rows, self.grid_cols
        )?;
        writeln!(f)?;
        for step in self.coordinates.iter() {
            writeln!(
                f,
                "{} > X{},Y{} > [{}]",
                step.label, step.row, step.col, step.elevation
            )?;
        }
        Ok(())
    }
}
