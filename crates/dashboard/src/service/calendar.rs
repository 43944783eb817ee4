use model::{
    errors::DashboardError,
    month::{DateWindow, Month},
};

/// Resolves month selectors against the single operative year.
#[derive(Clone, Copy, Debug)]
pub struct Calendar {
    year: i32,
}

impl Calendar {
    pub fn new(year: i32) -> Self {
        Calendar { year }
    }

    pub fn window(&self, month: &str) -> Result<DateWindow, DashboardError> {
        month.parse::<Month>()?.window(self.year)
    }
}
