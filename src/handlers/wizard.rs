use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::menu::{catalog, find_menu};
use crate::models::{BookingRecord, ClinicInfo, MenuOption, SelectedSlot};
use crate::services::handoff::ReservationLedger;
use crate::services::slot_grid::{GridDay, GridRow};
use crate::services::wizard::{BackOutcome, BookingWizard, StepKind};
use crate::state::{AppState, WizardSession};

#[derive(Serialize)]
pub struct WizardView {
    id: Uuid,
    step: StepKind,
    step_number: u8,
    can_proceed: bool,
    clinic: ClinicInfo,
    menu: Option<MenuOption>,
    slot: Option<SelectedSlot>,
    week_offset: u32,
}

impl WizardView {
    fn new(id: Uuid, wizard: &BookingWizard) -> Self {
        let draft = wizard.draft();
        Self {
            id,
            step: wizard.step_kind(),
            step_number: wizard.step_kind().number(),
            can_proceed: wizard.can_proceed(),
            clinic: wizard.clinic().clone(),
            menu: draft.menu,
            slot: draft.slot,
            week_offset: wizard.grid().week_offset(),
        }
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("booking session {id}"))
}

fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut WizardSession) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut sessions = state.live_sessions()?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.touch(Utc::now().naive_utc());
    f(session)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// GET /api/menus
pub async fn list_menus() -> Json<Vec<MenuOption>> {
    Json(catalog())
}

// POST /api/wizard
#[derive(Deserialize, Default)]
pub struct CreateWizardRequest {
    pub clinic_id: Option<u32>,
    pub clinic_name: Option<String>,
    pub customer_name: Option<String>,
}

pub async fn create_wizard(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWizardRequest>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let mut clinic = state.config.clinic.clone();
    if let Some(name) = body.clinic_name.filter(|n| !n.trim().is_empty()) {
        clinic.name = name;
    }
    if let Some(id) = body.clinic_id {
        clinic.id = id;
    }

    let id = Uuid::new_v4();
    let wizard = BookingWizard::new(clinic);
    let view = WizardView::new(id, &wizard);

    state
        .live_sessions()?
        .insert(id, WizardSession::new(wizard, body.customer_name));
    tracing::info!(session = %id, "booking session opened");

    Ok((StatusCode::CREATED, Json(view)))
}

// GET /api/wizard/:id
pub async fn get_wizard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_session(&state, id, |s| Ok(Json(WizardView::new(id, &s.wizard))))
}

// DELETE /api/wizard/:id
pub async fn discard_wizard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .live_sessions()?
        .remove(&id)
        .ok_or_else(|| session_not_found(id))?;
    tracing::info!(session = %id, "booking session discarded");
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/wizard/:id/menu
#[derive(Deserialize)]
pub struct SelectMenuRequest {
    pub menu_id: u32,
}

pub async fn select_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectMenuRequest>,
) -> Result<Json<WizardView>, AppError> {
    let menu = find_menu(body.menu_id)
        .ok_or_else(|| AppError::NotFound(format!("menu {}", body.menu_id)))?;
    with_session(&state, id, |s| {
        s.wizard.select_menu(menu)?;
        Ok(Json(WizardView::new(id, &s.wizard)))
    })
}

// GET /api/wizard/:id/grid
#[derive(Serialize)]
pub struct GridView {
    week_offset: u32,
    can_go_back: bool,
    month_label: String,
    days: Vec<GridDay>,
    rows: Vec<GridRow>,
    selected: Option<SelectedSlot>,
}

pub async fn get_grid(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GridView>, AppError> {
    let today = today();
    with_session(&state, id, |s| {
        let grid = s.wizard.grid();
        Ok(Json(GridView {
            week_offset: grid.week_offset(),
            can_go_back: grid.can_go_back(),
            month_label: grid.month_label(today),
            days: grid.week_days(today),
            rows: grid.rows(today),
            selected: grid.selected().cloned(),
        }))
    })
}

// POST /api/wizard/:id/grid/prev
pub async fn previous_week(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_session(&state, id, |s| {
        s.wizard.previous_week()?;
        Ok(Json(WizardView::new(id, &s.wizard)))
    })
}

// POST /api/wizard/:id/grid/next
pub async fn next_week(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_session(&state, id, |s| {
        s.wizard.next_week()?;
        Ok(Json(WizardView::new(id, &s.wizard)))
    })
}

// POST /api/wizard/:id/slot
#[derive(Deserialize)]
pub struct SelectSlotRequest {
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Serialize)]
pub struct SelectSlotResponse {
    selected: bool,
    wizard: WizardView,
}

pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectSlotRequest>,
) -> Result<Json<SelectSlotResponse>, AppError> {
    let in_past = body.date < today();
    with_session(&state, id, |s| {
        s.wizard.require_step(StepKind::Slot)?;
        // Past days are never shown in the grid; treat them like a closed cell.
        let selected = !in_past && s.wizard.select_slot(body.date, &body.time)?;
        Ok(Json(SelectSlotResponse {
            selected,
            wizard: WizardView::new(id, &s.wizard),
        }))
    })
}

// POST /api/wizard/:id/next
pub async fn next_step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_session(&state, id, |s| {
        s.wizard.next()?;
        Ok(Json(WizardView::new(id, &s.wizard)))
    })
}

// POST /api/wizard/:id/back
#[derive(Serialize)]
pub struct BackResponse {
    exited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    wizard: Option<WizardView>,
}

pub async fn go_back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BackResponse>, AppError> {
    let mut sessions = state.live_sessions()?;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.touch(Utc::now().naive_utc());

    match session.wizard.back() {
        BackOutcome::Step(_) => Ok(Json(BackResponse {
            exited: false,
            wizard: Some(WizardView::new(id, &session.wizard)),
        })),
        BackOutcome::Exit => {
            sessions.remove(&id);
            tracing::info!(session = %id, "booking session abandoned");
            Ok(Json(BackResponse {
                exited: true,
                wizard: None,
            }))
        }
    }
}

// POST /api/wizard/:id/confirm
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingRecord>, AppError> {
    // Lock order: database, then sessions. Both are held until the session
    // is either consumed or put back.
    let db = state.db()?;
    let mut sessions = state.live_sessions()?;
    let session = sessions.remove(&id).ok_or_else(|| session_not_found(id))?;

    let ledger = ReservationLedger::new(&db, session.customer_name.as_deref());
    match session.wizard.confirm(&ledger) {
        Ok(record) => {
            tracing::info!(session = %id, "booking session completed");
            Ok(Json(record))
        }
        Err(rejected) => {
            sessions.insert(
                id,
                WizardSession::new(rejected.wizard, session.customer_name),
            );
            Err(rejected.error.into())
        }
    }
}
