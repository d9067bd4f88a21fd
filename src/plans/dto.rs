use serde::Deserialize;

/// Coach-supplied generation parameters; the rest of the prompt inputs come
/// from the client record itself.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub days_per_week: String,
    #[serde(default)]
    pub available_equipment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SupplementRequest {
    /// Extra context beyond what the intake record carries.
    #[serde(default)]
    pub health_info: String,
}

/// Names the approved meal plan to shop for.
#[derive(Debug, Deserialize)]
pub struct GroceryListRequest {
    pub plan_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheatMealRequest {
    pub cravings: String,
    #[serde(default)]
    pub dietary_restrictions: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DrugInteractionRequest {
    pub compounds: String,
}
