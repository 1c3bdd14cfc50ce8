//! Diesel schema for category persistence.

diesel::table! {
    /// Category records.
    todo_categories (id) {
        /// Category identifier.
        #[max_length = 64]
        id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Display color as `#RRGGBB`.
        #[max_length = 7]
        color -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
