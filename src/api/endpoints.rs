use std::sync::{Mutex, MutexGuard};

use actix_web::{
    HttpRequest, HttpResponse,
    error::JsonPayloadError,
    get, post,
    web::{self, Path},
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{
    api::{
        rest::{
            EditorMode, EditorOpenRequest, EditorStateResponse, FormRequest, LocationForm, LocationResponse, NotificationListResponse, PaymentHistoryResponse, RateForm, RateResponse,
            RecordListResponse, ReportQuery, ReportResponse,
        },
        state::AppState,
    },
    model::{
        apperror::{ApplicationError, ErrorType},
        models::{ParkingLocation, ParkingRate, PaymentInputType, RegistrationInputType},
        record::Record,
    },
    service::{
        editor::{EditSurface, RecordCollectionEditor},
        validation::{FromForm, RawForm, coerce_and_validate},
    },
};

const API_BASE: &str = "/api/services/v1_0";

/**
 * A record kind exposed over the API, with its wire types and its editor in the application state.
 */
pub trait ApiRecord: Record {
    /**
     * Wire shape of the form values shown by the edit surface.
     */
    type Form: Serialize + From<Self::Fields>;
    type Response: Serialize + From<Self>;

    /**
     * Path segment of the collection below the API base path.
     */
    const COLLECTION: &'static str;

    fn editor(app_state: &AppState) -> &Mutex<RecordCollectionEditor<Self>>;
}

impl ApiRecord for ParkingLocation {
    type Form = LocationForm;
    type Response = LocationResponse;

    const COLLECTION: &'static str = "locations";

    fn editor(app_state: &AppState) -> &Mutex<RecordCollectionEditor<Self>> {
        &app_state.locations
    }
}

impl ApiRecord for ParkingRate {
    type Form = RateForm;
    type Response = RateResponse;

    const COLLECTION: &'static str = "rates";

    fn editor(app_state: &AppState) -> &Mutex<RecordCollectionEditor<Self>> {
        &app_state.rates
    }
}

/**
 * Registers every route of the application.
 */
pub fn configure_routes(config: &mut web::ServiceConfig) {
    config
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .service(web::scope(&format!("{API_BASE}/{}", ParkingLocation::COLLECTION)).configure(record_routes::<ParkingLocation>))
        .service(web::scope(&format!("{API_BASE}/{}", ParkingRate::COLLECTION)).configure(record_routes::<ParkingRate>))
        .service(payments_history)
        .service(payment_add)
        .service(registration_add)
        .service(report_get)
        .service(notifications_list);
}

/**
 * Routes of one record collection, relative to its scope.
 */
pub fn record_routes<R: ApiRecord>(config: &mut web::ServiceConfig)
where
    R::Fields: FromForm,
{
    config
        .service(web::resource("").route(web::get().to(records_list::<R>)).route(web::post().to(record_add::<R>)))
        .service(web::resource("/editor").route(web::get().to(editor_get::<R>)))
        .service(web::resource("/editor:open").route(web::post().to(editor_open::<R>)))
        .service(web::resource("/editor:close").route(web::post().to(editor_close::<R>)))
        .service(web::resource("/editor:submit").route(web::post().to(editor_submit::<R>)))
        .service(web::resource("/{recordId}").route(web::put().to(record_update::<R>)).route(web::delete().to(record_delete::<R>)));
}

/**
 * Endpoint to list the records of a collection.
 */
#[instrument(skip(http_request, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn records_list<R: ApiRecord>(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let editor = lock_editor::<R>(&app_state)?;
    let records: Vec<R::Response> = editor.list().iter().cloned().map(R::Response::from).collect();
    Ok(HttpResponse::Ok().json(RecordListResponse::new(records)))
}

/**
 * Endpoint to add a record.
 */
#[instrument(skip(http_request, request_body, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn record_add<R: ApiRecord>(http_request: HttpRequest, request_body: web::Json<FormRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError>
where
    R::Fields: FromForm,
{
    let fields = coerce_and_validate::<R::Fields>(&RawForm::from(request_body.into_inner()))?;
    let record = lock_editor::<R>(&app_state)?.create(fields)?;
    Ok(HttpResponse::Created().json(R::Response::from(record)))
}

/**
 * Endpoint to update a record.
 */
#[instrument(skip(http_request, request_body, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn record_update<R: ApiRecord>(path: Path<u64>, http_request: HttpRequest, request_body: web::Json<FormRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError>
where
    R::Fields: FromForm,
{
    let record_id = path.into_inner();
    let fields = coerce_and_validate::<R::Fields>(&RawForm::from(request_body.into_inner()))?;
    let record = lock_editor::<R>(&app_state)?.update(record_id, fields)?;
    Ok(HttpResponse::Ok().json(R::Response::from(record)))
}

/**
 * Endpoint to delete a record. Unknown ids succeed without changes.
 */
#[instrument(skip(http_request, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn record_delete<R: ApiRecord>(path: Path<u64>, http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let record_id = path.into_inner();
    lock_editor::<R>(&app_state)?.delete(record_id);
    Ok(HttpResponse::NoContent().finish())
}

/**
 * Endpoint to read the edit surface of a collection.
 */
#[instrument(skip(http_request, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn editor_get<R: ApiRecord>(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let editor = lock_editor::<R>(&app_state)?;
    Ok(HttpResponse::Ok().json(editor_state(&editor)))
}

/**
 * Endpoint to open the edit surface, for a new record or for an existing one.
 */
#[instrument(skip(http_request, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn editor_open<R: ApiRecord>(http_request: HttpRequest, request_body: web::Json<EditorOpenRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let mut editor = lock_editor::<R>(&app_state)?;
    match request_body.record_id {
        Some(record_id) => editor.open_edit(record_id)?,
        None => editor.open_add(),
    }
    Ok(HttpResponse::Ok().json(editor_state(&editor)))
}

/**
 * Endpoint to cancel editing.
 */
#[instrument(skip(http_request, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn editor_close<R: ApiRecord>(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let mut editor = lock_editor::<R>(&app_state)?;
    editor.close_form();
    Ok(HttpResponse::Ok().json(editor_state(&editor)))
}

/**
 * Endpoint to submit the raw form of the open edit surface.
 */
#[instrument(skip(http_request, request_body, app_state), fields(kind = R::KIND, trace_id = get_trace_id(&http_request)))]
pub async fn editor_submit<R: ApiRecord>(http_request: HttpRequest, request_body: web::Json<FormRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError>
where
    R::Fields: FromForm,
{
    let fields = coerce_and_validate::<R::Fields>(&RawForm::from(request_body.into_inner()))?;
    let record = lock_editor::<R>(&app_state)?.submit(fields)?;
    Ok(HttpResponse::Ok().json(R::Response::from(record)))
}

/**
 * Endpoint to retrieve the payment history.
 */
#[instrument(skip(http_request, app_state), fields(service = "listPayments", trace_id = get_trace_id(&http_request)))]
#[get("/api/services/v1_0/payments/history")]
pub async fn payments_history(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    Ok(HttpResponse::Ok().json(PaymentHistoryResponse::from(app_state.payment_service.get_history())))
}

/**
 * Endpoint to submit the payment form.
 */
#[instrument(skip(http_request, request_body, app_state), fields(service = "addPayment", trace_id = get_trace_id(&http_request)))]
#[post("/api/services/v1_0/payments")]
pub async fn payment_add(http_request: HttpRequest, request_body: web::Json<FormRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let payment_input = coerce_and_validate::<PaymentInputType>(&RawForm::from(request_body.into_inner()))?;
    app_state.payment_service.process_payment(&payment_input)?;
    Ok(HttpResponse::Accepted().finish())
}

/**
 * Endpoint to submit a frequent user registration.
 */
#[instrument(skip(http_request, request_body, app_state), fields(service = "addRegistration", trace_id = get_trace_id(&http_request)))]
#[post("/api/services/v1_0/registrations")]
pub async fn registration_add(http_request: HttpRequest, request_body: web::Json<FormRequest>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let registration_input = coerce_and_validate::<RegistrationInputType>(&RawForm::from(request_body.into_inner()))?;
    app_state.registration_service.register(&registration_input)?;
    Ok(HttpResponse::Accepted().finish())
}

/**
 * Endpoint to retrieve the reports dashboard.
 */
#[instrument(skip(http_request, app_state), fields(service = "getReport", trace_id = get_trace_id(&http_request)))]
#[get("/api/services/v1_0/reports")]
pub async fn report_get(http_request: HttpRequest, query: web::Query<ReportQuery>, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    let report = app_state.reports_service.get_report(query.period.unwrap_or_default());
    Ok(HttpResponse::Ok().json(ReportResponse::from(report)))
}

/**
 * Endpoint to collect pending notifications. Collected notifications are removed.
 */
#[instrument(skip(http_request, app_state), fields(service = "listNotifications", trace_id = get_trace_id(&http_request)))]
#[get("/api/services/v1_0/notifications")]
pub async fn notifications_list(http_request: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, ApplicationError> {
    Ok(HttpResponse::Ok().json(NotificationListResponse::from(app_state.notification_center.take_all())))
}

fn lock_editor<R: ApiRecord>(app_state: &AppState) -> Result<MutexGuard<'_, RecordCollectionEditor<R>>, ApplicationError> {
    R::editor(app_state).lock().map_err(|err| ApplicationError::new(ErrorType::Internal, format!("Failed to lock {} collection: {err}", R::KIND)))
}

fn editor_state<R: ApiRecord>(editor: &RecordCollectionEditor<R>) -> EditorStateResponse<R::Form> {
    let (mode, record_id) = match editor.surface() {
        EditSurface::Idle => (EditorMode::Idle, None),
        EditSurface::Creating => (EditorMode::Creating, None),
        EditSurface::Editing(record) => (EditorMode::Editing, Some(record.id())),
    };
    EditorStateResponse::new(mode, record_id, editor.form_values().map(R::Form::from))
}

/**
 * Turns unreadable JSON bodies into validation errors with the application error body.
 */
fn json_error(err: JsonPayloadError, http_request: &HttpRequest) -> actix_web::Error {
    warn!(path = http_request.path(), "Rejected request body: {err}");
    ApplicationError::new(ErrorType::Validation, format!("Invalid request body: {err}")).into()
}

/**
 * Retrieves the trace ID from the HTTP request headers.
 * If the trace ID is not present, a new UUID is generated.
 */
fn get_trace_id(http_request: &HttpRequest) -> String {
    http_request.headers().get("X-Trace-ID").and_then(|v| v.to_str().ok().map(std::string::ToString::to_string)).unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
