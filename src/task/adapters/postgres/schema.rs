//! Diesel schema for task persistence.

diesel::table! {
    /// Task records. Every column except `id` and `text` is nullable so rows
    /// written by older schema versions load and are backfilled on read.
    todo_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Display text.
        text -> Text,
        /// Completion status.
        #[max_length = 20]
        status -> Nullable<Varchar>,
        /// Priority score.
        score -> Nullable<BigInt>,
        /// Ordering key.
        position -> Nullable<BigInt>,
        /// Category reference.
        #[max_length = 64]
        category_id -> Nullable<Varchar>,
        /// Parent task reference.
        parent_id -> Nullable<Uuid>,
        /// Nesting depth.
        level -> Nullable<Integer>,
        /// Creation timestamp.
        created_at -> Nullable<Timestamptz>,
        /// Last update timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
