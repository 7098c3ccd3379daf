use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// The valid (row, seat) coordinate space of a cinema hall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatGeometry {
    pub rows: i32,
    pub seats_in_row: i32,
}

impl SeatGeometry {
    /// Checks that both dimensions are positive
    pub fn new(rows: i32, seats_in_row: i32) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if rows < 1 {
            errors.add("rows", "rows must be a positive integer");
        }
        if seats_in_row < 1 {
            errors.add("seats_in_row", "seats_in_row must be a positive integer");
        }
        errors.into_result()?;

        Ok(Self { rows, seats_in_row })
    }

    pub fn capacity(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.seats_in_row)
    }

    /// Validates a ticket position against this hall
    ///
    /// Both `row` and `seat` are checked, so a ticket that is out of range
    /// on both axes reports two errors.
    pub fn validate(&self, row: i32, seat: i32) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if row < 1 || row > self.rows {
            errors.add(
                "row",
                format!(
                    "row number must be in available range: (1, rows): (1, {})",
                    self.rows
                ),
            );
        }
        if seat < 1 || seat > self.seats_in_row {
            errors.add(
                "seat",
                format!(
                    "seat number must be in available range: (1, seats_in_row): (1, {})",
                    self.seats_in_row
                ),
            );
        }
        errors.into_result()
    }
}
