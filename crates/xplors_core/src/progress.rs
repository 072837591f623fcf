//! Paced progress narration.
//!
//! The driver is a pure counter: the caller feeds it ticks at the schedule's
//! cadence and decides when it may move on to the next stage. It never looks
//! at the network; the orchestrator gates the later stages on the upload result.
use std::time::Duration;

use thiserror::Error;

use crate::AnalysisKind;

/// Percentage added per tick while a stage is below its target.
pub const PROGRESS_STEP: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub target: u8,
    /// Minimum time spent in the stage before it may be left.
    pub dwell: Duration,
}

impl StageSpec {
    pub const fn new(name: &'static str, label: &'static str, target: u8, dwell_ms: u64) -> Self {
        Self {
            name,
            label,
            target,
            dwell: Duration::from_millis(dwell_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule has no stages")]
    Empty,
    #[error("stage targets must be strictly increasing (stage {index})")]
    NotIncreasing { index: usize },
    #[error("the last stage must target 100")]
    MissingTerminal,
    #[error("network stage {index} must precede the terminal stage")]
    NetworkStageOutOfRange { index: usize },
    #[error("cadence must be non-zero")]
    ZeroCadence,
}

/// Ordered stages plus the tick cadence.
///
/// `network_stage` is the first stage that cannot be left until the upload has
/// resolved successfully; every later stage inherits that gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSchedule {
    stages: Vec<StageSpec>,
    cadence: Duration,
    network_stage: usize,
}

impl StageSchedule {
    pub fn new(
        stages: Vec<StageSpec>,
        cadence: Duration,
        network_stage: usize,
    ) -> Result<Self, ScheduleError> {
        if stages.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if cadence.is_zero() {
            return Err(ScheduleError::ZeroCadence);
        }
        for (index, pair) in stages.windows(2).enumerate() {
            if pair[1].target <= pair[0].target {
                return Err(ScheduleError::NotIncreasing { index: index + 1 });
            }
        }
        if stages.last().map(|stage| stage.target) != Some(100) {
            return Err(ScheduleError::MissingTerminal);
        }
        if network_stage + 1 >= stages.len() {
            return Err(ScheduleError::NetworkStageOutOfRange {
                index: network_stage,
            });
        }
        Ok(Self {
            stages,
            cadence,
            network_stage,
        })
    }

    pub fn spreadsheet() -> Self {
        Self {
            stages: vec![
                StageSpec::new("send", "Sending file...", 20, 800),
                StageSpec::new("read", "Reading spreadsheet data...", 40, 600),
                StageSpec::new("ai-analyze", "Analysing with AI...", 60, 0),
                StageSpec::new("render-charts", "Rendering charts...", 80, 800),
                StageSpec::new("finalize", "Finalising report...", 95, 500),
                StageSpec::new("done", "Analysis complete!", 100, 0),
            ],
            cadence: Duration::from_millis(100),
            network_stage: 2,
        }
    }

    pub fn merchandising() -> Self {
        Self {
            stages: vec![
                StageSpec::new("send", "Sending stand photo...", 15, 600),
                StageSpec::new("process-image", "Processing image...", 30, 500),
                StageSpec::new("vision", "Analysing visual organisation...", 50, 400),
                StageSpec::new("layout-evaluate", "Evaluating product placement...", 70, 600),
                StageSpec::new("suggestions", "Generating suggestions...", 90, 500),
                StageSpec::new("finalize", "Finalising analysis...", 98, 400),
                StageSpec::new("done", "Analysis complete! See the suggestions below.", 100, 0),
            ],
            cadence: Duration::from_millis(80),
            network_stage: 2,
        }
    }

    pub fn for_kind(kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::Spreadsheet => Self::spreadsheet(),
            AnalysisKind::Merchandising => Self::merchandising(),
        }
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn network_stage(&self) -> usize {
        self.network_stage
    }
}

/// What the progress display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFrame {
    pub percent: u8,
    pub stage_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDriver {
    schedule: StageSchedule,
    stage: usize,
    percent: u8,
    ticks_in_stage: u32,
}

impl ProgressDriver {
    pub fn new(schedule: StageSchedule) -> Self {
        Self {
            schedule,
            stage: 0,
            percent: 0,
            ticks_in_stage: 0,
        }
    }

    pub fn schedule(&self) -> &StageSchedule {
        &self.schedule
    }

    pub fn frame(&self) -> ProgressFrame {
        ProgressFrame {
            percent: self.percent,
            stage_label: self.current().label,
        }
    }

    pub fn stage_index(&self) -> usize {
        self.stage
    }

    /// Moves the percentage one step toward the current target.
    /// Returns whether the displayed percentage changed.
    pub fn tick(&mut self) -> bool {
        self.ticks_in_stage = self.ticks_in_stage.saturating_add(1);
        let target = self.current().target;
        if self.percent >= target {
            return false;
        }
        self.percent = self.percent.saturating_add(PROGRESS_STEP).min(target);
        true
    }

    pub fn is_settled(&self) -> bool {
        self.percent >= self.current().target
    }

    pub fn dwell_elapsed(&self) -> bool {
        self.schedule.cadence.saturating_mul(self.ticks_in_stage) >= self.current().dwell
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage + 1 == self.schedule.stages.len()
    }

    /// Whether leaving the current stage needs the upload result.
    pub fn awaits_network(&self) -> bool {
        self.stage >= self.schedule.network_stage
    }

    /// Enters the next stage once the current target is reached.
    /// Returns false when unsettled or already on the last stage.
    pub fn advance(&mut self) -> bool {
        if !self.is_settled() || self.is_last_stage() {
            return false;
        }
        self.stage += 1;
        self.ticks_in_stage = 0;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.is_last_stage() && self.percent == 100
    }

    fn current(&self) -> &StageSpec {
        &self.schedule.stages[self.stage]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schedules_pass_validation() {
        for schedule in [StageSchedule::spreadsheet(), StageSchedule::merchandising()] {
            let rebuilt = StageSchedule::new(
                schedule.stages().to_vec(),
                schedule.cadence(),
                schedule.network_stage(),
            );
            assert_eq!(rebuilt, Ok(schedule));
        }
    }

    #[test]
    fn rejects_non_increasing_targets() {
        let stages = vec![
            StageSpec::new("a", "A", 50, 0),
            StageSpec::new("b", "B", 50, 0),
            StageSpec::new("c", "C", 100, 0),
        ];
        assert_eq!(
            StageSchedule::new(stages, Duration::from_millis(10), 0),
            Err(ScheduleError::NotIncreasing { index: 1 })
        );
    }

    #[test]
    fn rejects_network_gate_on_terminal_stage() {
        let stages = vec![
            StageSpec::new("a", "A", 50, 0),
            StageSpec::new("b", "B", 100, 0),
        ];
        assert_eq!(
            StageSchedule::new(stages, Duration::from_millis(10), 1),
            Err(ScheduleError::NetworkStageOutOfRange { index: 1 })
        );
    }

    #[test]
    fn tick_clamps_to_stage_target() {
        let stages = vec![
            StageSpec::new("a", "A", 3, 0),
            StageSpec::new("b", "B", 100, 0),
        ];
        let schedule = StageSchedule::new(stages, Duration::from_millis(10), 0).unwrap();
        let mut driver = ProgressDriver::new(schedule);

        assert!(driver.tick());
        assert_eq!(driver.frame().percent, 2);
        assert!(driver.tick());
        assert_eq!(driver.frame().percent, 3);
        assert!(!driver.tick());
        assert!(driver.is_settled());
    }

    #[test]
    fn advance_waits_for_target() {
        let mut driver = ProgressDriver::new(StageSchedule::spreadsheet());
        assert!(!driver.advance());
        for _ in 0..10 {
            driver.tick();
        }
        assert_eq!(driver.frame().percent, 20);
        assert!(driver.advance());
        assert_eq!(driver.frame().stage_label, "Reading spreadsheet data...");
        assert_eq!(driver.frame().percent, 20);
    }

    #[test]
    fn dwell_is_counted_in_ticks() {
        let mut driver = ProgressDriver::new(StageSchedule::spreadsheet());
        for _ in 0..7 {
            driver.tick();
        }
        assert!(!driver.dwell_elapsed());
        driver.tick();
        assert!(driver.dwell_elapsed());
    }
}
