use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

use crate::schema::{bioquimicos, mediciones, plan_nutricional, signos_vitales, users};

/// A credential row from the clinical database. Deliberately not
/// serializable: the stored password must never reach a response body.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAccount {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The user shape returned by a successful login. The folio doubles as the
/// account id and is the key for every clinical record lookup.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub folio: i32,
    pub name: String,
    pub email: String,
}

impl From<UserAccount> for UserProfile {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            folio: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

/// Anthropometric measurement history row.
#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = mediciones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MeasurementRecord {
    pub id: i32,
    pub folio: i32,
    pub recorded_at: NaiveDate,
    pub weight_kg: BigDecimal,
    pub height_cm: BigDecimal,
    pub bmi: Option<BigDecimal>,
    pub waist_cm: Option<BigDecimal>,
    pub hip_cm: Option<BigDecimal>,
}

/// Vital-signs history row.
#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = signos_vitales)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VitalSignsRecord {
    pub id: i32,
    pub folio: i32,
    pub recorded_at: NaiveDate,
    pub systolic_mmhg: i32,
    pub diastolic_mmhg: i32,
    pub heart_rate_bpm: i32,
    pub temperature_c: Option<BigDecimal>,
}

/// Blood-panel history row.
#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = bioquimicos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BiochemicalRecord {
    pub id: i32,
    pub folio: i32,
    pub recorded_at: NaiveDate,
    pub glucose_mg_dl: Option<BigDecimal>,
    pub cholesterol_mg_dl: Option<BigDecimal>,
    pub triglycerides_mg_dl: Option<BigDecimal>,
    pub hemoglobin_g_dl: Option<BigDecimal>,
}

/// Nutrition-plan row.
#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = plan_nutricional)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NutritionPlanRecord {
    pub id: i32,
    pub folio: i32,
    pub issued_at: NaiveDate,
    pub goal: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: Option<String>,
}
