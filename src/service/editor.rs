use std::sync::Arc;

use tracing::{debug, instrument};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    record::Record,
};
use crate::service::{
    notification::{Notification, Notifier},
    validation::validate_fields,
};

/**
 * State of the edit surface of one collection.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum EditSurface<R> {
    /**
     * Surface closed.
     */
    Idle,
    /**
     * Surface open with a blank form.
     */
    Creating,
    /**
     * Surface open with the form prefilled from the selected record.
     */
    Editing(R),
}

/**
 * In-memory collection of records with a single selection editing workflow.
 *
 * Records keep insertion order, updates replace in place. New identifiers are
 * `1 + max(existing ids)`, so deleting the record with the highest id makes
 * that id available again.
 */
pub struct RecordCollectionEditor<R: Record> {
    records: Vec<R>,
    surface: EditSurface<R>,
    notifier: Arc<dyn Notifier>,
}

impl<R: Record> RecordCollectionEditor<R> {
    /**
     * Creates a new editor over the given seed records.
     *
     * # Arguments
     * `seed`: Records the collection starts with.
     * `notifier`: Receives a notification for every create, update and delete.
     */
    pub fn new(seed: Vec<R>, notifier: Arc<dyn Notifier>) -> Self {
        RecordCollectionEditor { records: seed, surface: EditSurface::Idle, notifier }
    }

    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn surface(&self) -> &EditSurface<R> {
        &self.surface
    }

    /**
     * Validates the fields and appends a new record.
     *
     * # Returns
     * The created record or a validation `ApplicationError`. The collection is unchanged on error.
     */
    #[instrument(level = "debug", skip(self, fields), fields(kind = R::KIND, id = tracing::field::Empty))]
    pub fn create(&mut self, fields: R::Fields) -> Result<R, ApplicationError> {
        validate_fields(&fields)?;
        let id = self.next_id();
        tracing::Span::current().record("id", id);
        let record = R::with_id(id, fields);
        self.records.push(record.clone());
        self.surface = EditSurface::Idle;
        self.notifier.notify(Notification::new(format!("{} created", R::LABEL), format!("{} was added successfully.", record.name())));
        Ok(record)
    }

    /**
     * Validates the fields and replaces the record with the given id, keeping the id.
     *
     * # Returns
     * The updated record, a validation error, or `NotFound` when no record has the id.
     * The collection and the edit surface are unchanged on error.
     */
    #[instrument(level = "debug", skip(self, fields), fields(kind = R::KIND))]
    pub fn update(&mut self, id: u64, fields: R::Fields) -> Result<R, ApplicationError> {
        validate_fields(&fields)?;
        let Some(slot) = self.records.iter_mut().find(|record| record.id() == id) else {
            return Err(ApplicationError::new(ErrorType::NotFound, format!("{} {id} not found", R::LABEL)));
        };
        let record = R::with_id(id, fields);
        *slot = record.clone();
        self.surface = EditSurface::Idle;
        self.notifier.notify(Notification::new(format!("{} updated", R::LABEL), format!("{} was updated successfully.", record.name())));
        Ok(record)
    }

    /**
     * Removes the record with the given id. Unknown ids are a no-op.
     *
     * # Returns
     * The removed record, if any.
     */
    #[instrument(level = "debug", skip(self), fields(kind = R::KIND))]
    pub fn delete(&mut self, id: u64) -> Option<R> {
        let Some(position) = self.records.iter().position(|record| record.id() == id) else {
            debug!("Nothing to delete");
            return None;
        };
        let removed = self.records.remove(position);
        self.notifier.notify(Notification::destructive(format!("{} deleted", R::LABEL), format!("{} was deleted successfully.", removed.name())));
        Some(removed)
    }

    /**
     * Opens the edit surface. `None` opens a blank create form, a record opens its edit form.
     */
    pub fn select_for_edit(&mut self, record: Option<R>) {
        self.surface = match record {
            Some(record) => EditSurface::Editing(record),
            None => EditSurface::Creating,
        };
    }

    pub fn open_add(&mut self) {
        self.select_for_edit(None);
    }

    /**
     * Opens the edit form for the record with the given id.
     */
    pub fn open_edit(&mut self, id: u64) -> Result<(), ApplicationError> {
        let record = self.get(id).cloned().ok_or_else(|| ApplicationError::new(ErrorType::NotFound, format!("{} {id} not found", R::LABEL)))?;
        self.select_for_edit(Some(record));
        Ok(())
    }

    /**
     * Cancels editing without touching the collection.
     */
    pub fn close_form(&mut self) {
        self.surface = EditSurface::Idle;
    }

    /**
     * Submits the open form: creates in `Creating`, updates the selected record in `Editing`.
     *
     * # Returns
     * The created or updated record. `InvalidState` when the surface is closed.
     */
    pub fn submit(&mut self, fields: R::Fields) -> Result<R, ApplicationError> {
        let selected_id = match &self.surface {
            EditSurface::Idle => return Err(ApplicationError::new(ErrorType::InvalidState, format!("No {} form is open", R::KIND))),
            EditSurface::Creating => None,
            EditSurface::Editing(selected) => Some(selected.id()),
        };
        match selected_id {
            Some(id) => self.update(id, fields),
            None => self.create(fields),
        }
    }

    /**
     * Values the open form shows: defaults when creating, the selected record when editing.
     */
    pub fn form_values(&self) -> Option<R::Fields> {
        match &self.surface {
            EditSurface::Idle => None,
            EditSurface::Creating => Some(R::form_defaults()),
            EditSurface::Editing(selected) => Some(selected.fields()),
        }
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(Record::id).max().map_or(1, |max| max + 1)
    }
}
