//! Completed-session summaries and per-session scoring.

use serde::{Deserialize, Serialize};

use crate::digit_span::RecallDirection;
use crate::grid::Operation;
use crate::module::ModuleKind;

fn default_module_id() -> String {
    ModuleKind::ArithmeticGrid.id().to_string()
}

/// Summary of one finished session, in the stored browser format.
///
/// Records written before modules existed carry no `moduleId`; they belong
/// to the arithmetic grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    /// Milliseconds since the Unix epoch at completion.
    pub timestamp: u64,
    #[serde(default = "default_module_id")]
    pub module_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    /// Size or configuration descriptor, e.g. `4×4` or `20 words`.
    pub grid_size: String,
    pub total_cells: u32,
    pub correct_count: u32,
    pub accuracy: u32,
    #[serde(default)]
    pub time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<RecallDirection>,
}

impl SessionResult {
    pub fn new(
        timestamp: u64,
        module: ModuleKind,
        grid_size: impl Into<String>,
        total: u32,
        correct: u32,
    ) -> Self {
        Self {
            timestamp,
            module_id: module.id().to_string(),
            operation: None,
            grid_size: grid_size.into(),
            total_cells: total,
            correct_count: correct,
            accuracy: accuracy_percent(correct, total),
            time_ms: None,
            direction: None,
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn with_time_ms(mut self, time_ms: Option<u64>) -> Self {
        self.time_ms = time_ms;
        self
    }

    pub fn with_direction(mut self, direction: RecallDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// The module this session belongs to, if it is still registered.
    pub fn module(&self) -> Option<ModuleKind> {
        ModuleKind::from_id(&self.module_id)
    }
}

/// `round(correct / total * 100)`, or 0 for an empty session.
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    // Integer form of round-half-up.
    ((correct * 200 + total) / (2 * total)) as u32
}

/// `m:ss.t`
pub fn format_elapsed(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let tenths = (ms % 1000) / 100;
    format!("{}:{:02}.{}", minutes, seconds, tenths)
}

/// Running tally of judged trials within one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    correct: u32,
    total: u32,
    response_ms: u64,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, correct: bool, response_ms: u64) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
        self.response_ms += response_ms;
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.total)
    }

    /// Mean response time, rounded; 0 before any trial.
    pub fn average_response_ms(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        let total = u64::from(self.total);
        (self.response_ms * 2 + total) / (2 * total)
    }

    pub fn into_result(
        self,
        timestamp: u64,
        module: ModuleKind,
        grid_size: impl Into<String>,
        time_ms: Option<u64>,
    ) -> SessionResult {
        SessionResult::new(timestamp, module, grid_size, self.total, self.correct)
            .with_time_ms(time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_half_up() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(16, 16), 100);
    }

    #[test]
    fn elapsed_format() {
        assert_eq!(format_elapsed(0), "0:00.0");
        assert_eq!(format_elapsed(65_432), "1:05.4");
        assert_eq!(format_elapsed(600_099), "10:00.0");
    }

    #[test]
    fn legacy_record_defaults_to_grid_module() {
        let json = r#"{"timestamp":1,"gridSize":"4×4","totalCells":16,"correctCount":8,"accuracy":50,"timeMs":null}"#;
        let rec: SessionResult = serde_json::from_str(json).unwrap();
        assert_eq!(rec.module(), Some(ModuleKind::ArithmeticGrid));
        assert_eq!(rec.time_ms, None);
    }

    #[test]
    fn serializes_camel_case() {
        let rec = SessionResult::new(5, ModuleKind::DigitSpan, "6 span", 4, 3)
            .with_direction(RecallDirection::Backward)
            .with_time_ms(Some(1200));
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["moduleId"], "digit-span");
        assert_eq!(v["correctCount"], 3);
        assert_eq!(v["accuracy"], 75);
        assert_eq!(v["direction"], "backward");
        assert_eq!(v["timeMs"], 1200);
        assert!(v.get("operation").is_none());
    }

    #[test]
    fn scorecard_tallies() {
        let mut card = Scorecard::new();
        card.record(true, 400);
        card.record(false, 801);
        card.record(true, 300);
        assert_eq!(card.correct(), 2);
        assert_eq!(card.total(), 3);
        assert_eq!(card.accuracy(), 67);
        assert_eq!(card.average_response_ms(), 500);
        let rec = card.into_result(9, ModuleKind::Stroop, "3 trials", Some(2000));
        assert_eq!(rec.module_id, "stroop");
        assert_eq!(rec.total_cells, 3);
    }
}
