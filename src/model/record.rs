use validator::Validate;

/**
 * A record that can be kept in a `RecordCollectionEditor`.
 *
 * A record is an integer identifier plus entity specific fields. `Fields` is the
 * record without its identifier, which is what create and update forms produce.
 */
pub trait Record: Clone + Send + 'static {
    /**
     * Entity specific fields, checked against the constraint set before any mutation.
     */
    type Fields: Validate + Clone + Send;

    /**
     * Machine name of the entity, used in logs and metrics.
     */
    const KIND: &'static str;

    /**
     * Human readable name of the entity, used in notifications.
     */
    const LABEL: &'static str;

    fn id(&self) -> u64;

    fn name(&self) -> &str;

    /**
     * Builds a record from an identifier and its fields.
     */
    fn with_id(id: u64, fields: Self::Fields) -> Self;

    /**
     * Returns the fields of this record, used to prefill the edit form.
     */
    fn fields(&self) -> Self::Fields;

    /**
     * Values a blank create form starts with.
     */
    fn form_defaults() -> Self::Fields;
}
