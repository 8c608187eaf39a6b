// Tables span the two deployment databases. The checkout pool only ever
// touches orders/order_details/customers/notification_outbox; the clinical
// pool only users/mediciones/signos_vitales/bioquimicos/plan_nutricional.

diesel::table! {
    orders (order_id) {
        #[max_length = 64]
        order_id -> Varchar,
        total -> Numeric,
        #[max_length = 255]
        customer_name -> Varchar,
        #[max_length = 255]
        customer_email -> Varchar,
        customer_address -> Text,
        #[max_length = 50]
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    order_details (id) {
        id -> Int4,
        #[max_length = 64]
        order_id -> Varchar,
        #[max_length = 255]
        product_name -> Varchar,
        quantity -> Nullable<Int4>,
        price -> Nullable<Numeric>,
    }
}

diesel::table! {
    customers (order_id) {
        #[max_length = 64]
        order_id -> Varchar,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 32]
        phone -> Nullable<Varchar>,
        address -> Text,
    }
}

diesel::table! {
    notification_outbox (id) {
        id -> Uuid,
        #[max_length = 255]
        aggregate_type -> Varchar,
        #[max_length = 255]
        aggregate_id -> Varchar,
        #[max_length = 255]
        event_type -> Varchar,
        payload -> Jsonb,
        attempts -> Int4,
        processed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password -> Varchar,
    }
}

diesel::table! {
    mediciones (id) {
        id -> Int4,
        folio -> Int4,
        recorded_at -> Date,
        weight_kg -> Numeric,
        height_cm -> Numeric,
        bmi -> Nullable<Numeric>,
        waist_cm -> Nullable<Numeric>,
        hip_cm -> Nullable<Numeric>,
    }
}

diesel::table! {
    signos_vitales (id) {
        id -> Int4,
        folio -> Int4,
        recorded_at -> Date,
        systolic_mmhg -> Int4,
        diastolic_mmhg -> Int4,
        heart_rate_bpm -> Int4,
        temperature_c -> Nullable<Numeric>,
    }
}

diesel::table! {
    bioquimicos (id) {
        id -> Int4,
        folio -> Int4,
        recorded_at -> Date,
        glucose_mg_dl -> Nullable<Numeric>,
        cholesterol_mg_dl -> Nullable<Numeric>,
        triglycerides_mg_dl -> Nullable<Numeric>,
        hemoglobin_g_dl -> Nullable<Numeric>,
    }
}

diesel::table! {
    plan_nutricional (id) {
        id -> Int4,
        folio -> Int4,
        issued_at -> Date,
        goal -> Text,
        breakfast -> Text,
        lunch -> Text,
        dinner -> Text,
        snacks -> Nullable<Text>,
    }
}

diesel::joinable!(order_details -> orders (order_id));
diesel::joinable!(customers -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(orders, order_details, customers, notification_outbox,);
