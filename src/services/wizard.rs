use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BookingDraft, BookingRecord, ClinicInfo, MenuOption, SelectedSlot};
use crate::services::handoff::BookingHandoff;
use crate::services::slot_grid::SlotGrid;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Menu,
    Slot,
    Confirm,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Menu => "menu",
            StepKind::Slot => "slot",
            StepKind::Confirm => "confirm",
        }
    }

    /// 1-based position shown as "Step n/3".
    pub fn number(&self) -> u8 {
        match self {
            StepKind::Menu => 1,
            StepKind::Slot => 2,
            StepKind::Confirm => 3,
        }
    }
}

/// Each step carries only what has been settled by then. The grid rides
/// along so that going back restores the week and cell the user left.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    Menu {
        menu: Option<MenuOption>,
        grid: SlotGrid,
    },
    Slot {
        menu: MenuOption,
        grid: SlotGrid,
    },
    Confirm {
        menu: MenuOption,
        slot: SelectedSlot,
        grid: SlotGrid,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("choose a menu before continuing")]
    MenuRequired,

    #[error("choose a date and time before continuing")]
    SlotRequired,

    #[error("not available on the {0} step")]
    WrongStep(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Step(StepKind),
    /// Back from the first step leaves the booking flow altogether.
    Exit,
}

/// Returned by [`BookingWizard::confirm`] when the wizard is not on the
/// confirmation step; the untouched wizard is handed back.
#[derive(Debug)]
pub struct ConfirmRejected {
    pub wizard: BookingWizard,
    pub error: WizardError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    clinic: ClinicInfo,
    step: WizardStep,
}

impl BookingWizard {
    pub fn new(clinic: ClinicInfo) -> Self {
        Self {
            clinic,
            step: WizardStep::Menu {
                menu: None,
                grid: SlotGrid::new(),
            },
        }
    }

    pub fn clinic(&self) -> &ClinicInfo {
        &self.clinic
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn step_kind(&self) -> StepKind {
        match self.step {
            WizardStep::Menu { .. } => StepKind::Menu,
            WizardStep::Slot { .. } => StepKind::Slot,
            WizardStep::Confirm { .. } => StepKind::Confirm,
        }
    }

    pub fn grid(&self) -> &SlotGrid {
        match &self.step {
            WizardStep::Menu { grid, .. }
            | WizardStep::Slot { grid, .. }
            | WizardStep::Confirm { grid, .. } => grid,
        }
    }

    pub fn draft(&self) -> BookingDraft {
        match &self.step {
            WizardStep::Menu { menu, grid } => BookingDraft {
                menu: menu.clone(),
                slot: grid.selected().cloned(),
            },
            WizardStep::Slot { menu, grid } => BookingDraft {
                menu: Some(menu.clone()),
                slot: grid.selected().cloned(),
            },
            WizardStep::Confirm { menu, slot, .. } => BookingDraft {
                menu: Some(menu.clone()),
                slot: Some(slot.clone()),
            },
        }
    }

    /// Whether "next" is currently allowed.
    pub fn can_proceed(&self) -> bool {
        match &self.step {
            WizardStep::Menu { menu, .. } => menu.is_some(),
            WizardStep::Slot { grid, .. } => grid.selected().is_some(),
            WizardStep::Confirm { .. } => false,
        }
    }

    pub fn select_menu(&mut self, choice: MenuOption) -> Result<(), WizardError> {
        let kind = self.step_kind();
        match &mut self.step {
            WizardStep::Menu { menu, .. } => {
                tracing::debug!(menu_id = choice.id, "menu selected");
                *menu = Some(choice);
                Ok(())
            }
            _ => Err(WizardError::WrongStep(kind.as_str())),
        }
    }

    /// Returns `Ok(false)` when the cell is closed; the selection is unchanged.
    pub fn select_slot(&mut self, date: NaiveDate, time: &str) -> Result<bool, WizardError> {
        Ok(self.slot_grid_mut()?.select_cell(date, time))
    }

    pub fn previous_week(&mut self) -> Result<u32, WizardError> {
        let grid = self.slot_grid_mut()?;
        grid.go_to_previous_week();
        Ok(grid.week_offset())
    }

    pub fn next_week(&mut self) -> Result<u32, WizardError> {
        let grid = self.slot_grid_mut()?;
        grid.go_to_next_week();
        Ok(grid.week_offset())
    }

    /// Guarded forward transition. A rejected call leaves the wizard as it was.
    pub fn next(&mut self) -> Result<StepKind, WizardError> {
        let advanced = match &self.step {
            WizardStep::Menu { menu: None, .. } => return Err(WizardError::MenuRequired),
            WizardStep::Menu {
                menu: Some(menu),
                grid,
            } => WizardStep::Slot {
                menu: menu.clone(),
                grid: grid.clone(),
            },
            WizardStep::Slot { menu, grid } => {
                let slot = grid.selected().cloned().ok_or(WizardError::SlotRequired)?;
                WizardStep::Confirm {
                    menu: menu.clone(),
                    slot,
                    grid: grid.clone(),
                }
            }
            WizardStep::Confirm { .. } => return Err(self.wrong_step()),
        };
        self.step = advanced;
        tracing::debug!(step = self.step_kind().as_str(), "wizard advanced");
        Ok(self.step_kind())
    }

    pub fn back(&mut self) -> BackOutcome {
        let previous = match &self.step {
            WizardStep::Menu { .. } => return BackOutcome::Exit,
            WizardStep::Slot { menu, grid } => WizardStep::Menu {
                menu: Some(menu.clone()),
                grid: grid.clone(),
            },
            WizardStep::Confirm { menu, grid, .. } => WizardStep::Slot {
                menu: menu.clone(),
                grid: grid.clone(),
            },
        };
        self.step = previous;
        tracing::debug!(step = self.step_kind().as_str(), "wizard went back");
        BackOutcome::Step(self.step_kind())
    }

    /// Freezes the booking and hands it off once. The wizard is consumed;
    /// a failing handoff is logged, not retried.
    pub fn confirm(self, handoff: &dyn BookingHandoff) -> Result<BookingRecord, ConfirmRejected> {
        let record = match &self.step {
            WizardStep::Confirm { menu, slot, .. } => {
                Some(BookingRecord::assemble(&self.clinic, menu, slot))
            }
            _ => None,
        };
        let Some(record) = record else {
            let error = self.wrong_step();
            return Err(ConfirmRejected {
                wizard: self,
                error,
            });
        };

        match handoff.hand_off(&record) {
            Ok(()) => tracing::info!(
                clinic_id = record.clinic_id,
                menu_id = record.menu_id,
                date = %record.date,
                time = %record.time,
                "booking confirmed"
            ),
            Err(e) => tracing::error!(error = %e, "booking handoff failed"),
        }

        Ok(record)
    }

    pub fn require_step(&self, kind: StepKind) -> Result<(), WizardError> {
        if self.step_kind() == kind {
            Ok(())
        } else {
            Err(self.wrong_step())
        }
    }

    fn slot_grid_mut(&mut self) -> Result<&mut SlotGrid, WizardError> {
        let kind = self.step_kind();
        match &mut self.step {
            WizardStep::Slot { grid, .. } => Ok(grid),
            _ => Err(WizardError::WrongStep(kind.as_str())),
        }
    }

    fn wrong_step(&self) -> WizardError {
        WizardError::WrongStep(self.step_kind().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::find_menu;
    use std::cell::RefCell;

    struct RecordingHandoff {
        records: RefCell<Vec<BookingRecord>>,
        fail: bool,
    }

    impl RecordingHandoff {
        fn new() -> Self {
            Self {
                records: RefCell::new(vec![]),
                fail: false,
            }
        }
    }

    impl BookingHandoff for RecordingHandoff {
        fn hand_off(&self, record: &BookingRecord) -> anyhow::Result<()> {
            self.records.borrow_mut().push(record.clone());
            if self.fail {
                anyhow::bail!("receipt screen unavailable");
            }
            Ok(())
        }
    }

    fn clinic() -> ClinicInfo {
        ClinicInfo {
            id: 1,
            name: "Clinicity 渋谷本院".to_string(),
            area: "渋谷".to_string(),
            image: "/images/skin/001.webp".to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at_confirm() -> BookingWizard {
        let mut wizard = BookingWizard::new(clinic());
        wizard.select_menu(find_menu(1).unwrap()).unwrap();
        wizard.next().unwrap();
        assert!(wizard.select_slot(date("2026-02-10"), "14:00").unwrap());
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_starts_on_menu_step_with_empty_draft() {
        let wizard = BookingWizard::new(clinic());
        assert_eq!(wizard.step_kind(), StepKind::Menu);
        assert_eq!(wizard.draft(), BookingDraft::default());
        assert!(!wizard.can_proceed());
    }

    #[test]
    fn test_next_without_menu_is_rejected() {
        let mut wizard = BookingWizard::new(clinic());
        let before = wizard.clone();
        assert_eq!(wizard.next(), Err(WizardError::MenuRequired));
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_menu_selection_does_not_advance() {
        let mut wizard = BookingWizard::new(clinic());
        wizard.select_menu(find_menu(2).unwrap()).unwrap();
        assert_eq!(wizard.step_kind(), StepKind::Menu);
        assert!(wizard.can_proceed());
        assert_eq!(wizard.next(), Ok(StepKind::Slot));
    }

    #[test]
    fn test_next_without_slot_is_rejected() {
        let mut wizard = BookingWizard::new(clinic());
        wizard.select_menu(find_menu(1).unwrap()).unwrap();
        wizard.next().unwrap();
        let before = wizard.clone();

        assert_eq!(wizard.next(), Err(WizardError::SlotRequired));
        assert_eq!(wizard, before);

        // closed cell: still nothing selected
        assert_eq!(wizard.select_slot(date("2026-02-10"), "11:00"), Ok(false));
        assert_eq!(wizard.next(), Err(WizardError::SlotRequired));

        assert_eq!(wizard.select_slot(date("2026-02-10"), "10:30"), Ok(true));
        assert_eq!(wizard.step_kind(), StepKind::Slot);
        assert_eq!(wizard.next(), Ok(StepKind::Confirm));
    }

    #[test]
    fn test_slot_operations_need_slot_step() {
        let mut wizard = BookingWizard::new(clinic());
        assert_eq!(
            wizard.select_slot(date("2026-02-10"), "10:00"),
            Err(WizardError::WrongStep("menu"))
        );
        assert_eq!(wizard.next_week(), Err(WizardError::WrongStep("menu")));
        assert_eq!(
            wizard.require_step(StepKind::Slot),
            Err(WizardError::WrongStep("menu"))
        );
        assert_eq!(wizard.require_step(StepKind::Menu), Ok(()));

        let mut wizard = at_confirm();
        assert_eq!(
            wizard.select_menu(find_menu(3).unwrap()),
            Err(WizardError::WrongStep("confirm"))
        );
        assert_eq!(wizard.next(), Err(WizardError::WrongStep("confirm")));
    }

    #[test]
    fn test_back_keeps_choices() {
        let mut wizard = at_confirm();
        assert_eq!(wizard.back(), BackOutcome::Step(StepKind::Slot));
        assert_eq!(
            wizard.grid().selected().map(|s| s.time.as_str()),
            Some("14:00")
        );
        assert_eq!(wizard.back(), BackOutcome::Step(StepKind::Menu));
        assert_eq!(wizard.draft().menu.map(|m| m.id), Some(1));
        assert_eq!(wizard.back(), BackOutcome::Exit);
        assert_eq!(wizard.step_kind(), StepKind::Menu);
    }

    #[test]
    fn test_week_navigation_through_wizard() {
        let mut wizard = BookingWizard::new(clinic());
        wizard.select_menu(find_menu(1).unwrap()).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.previous_week(), Ok(0));
        assert_eq!(wizard.next_week(), Ok(1));
        assert_eq!(wizard.next_week(), Ok(2));
        assert_eq!(wizard.previous_week(), Ok(1));
    }

    #[test]
    fn test_round_trip() {
        let handoff = RecordingHandoff::new();
        let record = at_confirm().confirm(&handoff).unwrap();

        assert_eq!(record.menu_name, "ハイドラフェイシャル全顔");
        assert_eq!(record.menu_price, "¥9,800");
        assert_eq!(record.time, "14:00");
        assert_eq!(record.date_str, "2/10");
        assert_eq!(record.day_of_week, 2);
        assert_eq!(record.year, 2026);
        assert_eq!(record.month, 2);
        assert_eq!(record.clinic_name, "Clinicity 渋谷本院");

        let handed = handoff.records.borrow();
        assert_eq!(handed.len(), 1);
        assert_eq!(handed[0], record);
    }

    #[test]
    fn test_confirm_before_last_step_returns_wizard() {
        let handoff = RecordingHandoff::new();
        let mut wizard = BookingWizard::new(clinic());
        wizard.select_menu(find_menu(4).unwrap()).unwrap();

        let rejected = wizard.clone().confirm(&handoff).unwrap_err();
        assert_eq!(rejected.error, WizardError::WrongStep("menu"));
        assert_eq!(rejected.wizard, wizard);
        assert!(handoff.records.borrow().is_empty());
    }

    #[test]
    fn test_failed_handoff_still_yields_record() {
        let handoff = RecordingHandoff {
            records: RefCell::new(vec![]),
            fail: true,
        };
        let record = at_confirm().confirm(&handoff).unwrap();
        assert_eq!(record.time, "14:00");
        assert_eq!(handoff.records.borrow().len(), 1);
    }
}
