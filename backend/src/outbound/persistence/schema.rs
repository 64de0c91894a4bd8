//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Candidate records. `lower(email)` is unique (`candidates_email_key`).
    candidates (id) {
        id -> Int4,
        #[max_length = 100]
        firstname -> Varchar,
        #[max_length = 100]
        lastname -> Nullable<Varchar>,
        #[max_length = 80]
        email -> Varchar,
        age -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}
