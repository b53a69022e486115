diesel::table! {
    use diesel::sql_types::*;

    chats (id) {
        id -> Uuid,
        user_id -> Uuid,
        document_id -> Uuid,
        sender -> Varchar,
        message -> Text,
        timestamp -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use pgvector::sql_types::*;

    document_chunks (id) {
        id -> Text,
        document_id -> Uuid,
        chunk_text -> Text,
        embedding -> Vector,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    documents (id) {
        id -> Uuid,
        name -> Varchar,
        year -> Int4,
        description -> Nullable<Text>,
        file_url -> Text,
        uploaded_by -> Nullable<Uuid>,
        status -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    sacco_metrics (id) {
        id -> Uuid,
        document_id -> Uuid,
        year -> Int4,
        membership_count -> Int4,
        loan_book_value -> Float8,
        asset_base -> Float8,
        deposits -> Float8,
        dividend_rate -> Float8,
        interest_rebate -> Float8,
        revenue -> Float8,
        portfolio_at_risk -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(chats -> documents (document_id));
diesel::joinable!(document_chunks -> documents (document_id));
diesel::joinable!(sacco_metrics -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(chats, document_chunks, documents, sacco_metrics,);
