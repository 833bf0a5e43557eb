diesel::table! {
    notes (id) {
        id -> Int4,
        title -> Text,
        body -> Text,
        color -> Varchar,
        pos_x -> Int4,
        pos_y -> Int4,
        updated_at -> Timestamp,
    }
}
