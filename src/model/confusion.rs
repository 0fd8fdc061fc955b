use crate::error::EvalError;
use crate::model::rating::RATING_CATEGORIES;

/// Contingency table of paired ratings, indexed `[rating by A][rating by B]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    cells: [[u32; RATING_CATEGORIES]; RATING_CATEGORIES],
}

impl ConfusionMatrix {
    pub fn record(&mut self, rate_a: u8, rate_b: u8) -> Result<(), EvalError> {
        let a = check_rating("rater_a", rate_a)?;
        let b = check_rating("rater_b", rate_b)?;
        self.cells[a][b] += 1;
        Ok(())
    }

    pub fn cell(&self, rate_a: usize, rate_b: usize) -> u32 {
        self.cells[rate_a][rate_b]
    }

    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// Number of recordings where rater A gave `rating`.
    pub fn row_sum(&self, rating: usize) -> u32 {
        self.cells[rating].iter().sum()
    }

    /// Number of recordings where rater B gave `rating`.
    pub fn col_sum(&self, rating: usize) -> u32 {
        self.cells.iter().map(|row| row[rating]).sum()
    }

    /// Cohen's Kappa over the full table.
    ///
    /// `DivisionUndefined` when the table is empty or chance agreement is
    /// total (every recording in one category on both sides).
    pub fn kappa(&self) -> Result<f64, EvalError> {
        let total = self.total();
        if total == 0 {
            return Err(EvalError::DivisionUndefined);
        }
        let total = total as f64;

        let mut diagonal = 0u32;
        for k in 0..RATING_CATEGORIES {
            diagonal += self.cell(k, k);
        }
        let po = diagonal as f64 / total;

        let mut pe = 0.0f64;
        for k in 0..RATING_CATEGORIES {
            pe += (self.row_sum(k) as f64 / total) * (self.col_sum(k) as f64 / total);
        }

        if (1.0 - pe).abs() < f64::EPSILON {
            return Err(EvalError::DivisionUndefined);
        }
        Ok((po - pe) / (1.0 - pe))
    }
}

fn check_rating(field: &str, rate: u8) -> Result<usize, EvalError> {
    let idx = rate as usize;
    if idx >= RATING_CATEGORIES {
        return Err(EvalError::InvalidRating {
            field: field.to_string(),
            value: rate.to_string(),
        });
    }
    Ok(idx)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/confusion.rs"]
mod tests;
