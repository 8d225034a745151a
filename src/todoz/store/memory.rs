use super::Storage;
use crate::error::{Result, TodosError};

/// In-memory storage for testing.
/// Starts out never-written (an empty blob).
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: String,
    writes: usize,
    simulate_write_error: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage, as if a previous process had written `data`.
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl Storage for InMemoryStorage {
    fn read(&self) -> Result<String> {
        Ok(self.data.clone())
    }

    fn write(&mut self, data: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(TodosError::Store("Simulated write error".to_string()));
        }
        self.data = data.to_string();
        self.writes += 1;
        Ok(())
    }
}
