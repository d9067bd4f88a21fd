mod gemini;

pub use gemini::GeminiGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    BloodType, Client, EnhancementStatus, Meal, MealPlan, SupplementStack, WorkoutDay,
};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("AI features are disabled because no generation API key is configured")]
    Disabled,
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation service returned unusable content: {0}")]
    Malformed(String),
}

/// Plan content as returned by the generation service, before the workflow
/// layer attaches a draft id and status.
#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanContent {
    pub daily_calories_goal: u32,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutPlanContent {
    pub plan_name: String,
    pub weekly_schedule: Vec<WorkoutDay>,
}

#[derive(Debug, Clone)]
pub struct MealPlanParams {
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub activity_level: String,
    pub goal: String,
    pub dietary_restrictions: String,
    pub work_schedule: String,
    pub blood_type: Option<BloodType>,
    pub status: EnhancementStatus,
    pub health_conditions: String,
    pub allergies: String,
}

impl MealPlanParams {
    pub fn from_client(client: &Client, dietary_restrictions: String) -> Self {
        Self {
            age: client.profile.age.clone(),
            gender: format!("{:?}", client.profile.gender).to_lowercase(),
            weight: client.profile.weight.clone(),
            height: client.profile.height.clone(),
            activity_level: format!("{:?}", client.profile.activity_level),
            goal: client.goal.clone(),
            dietary_restrictions,
            work_schedule: client.intake_data.work_schedule.clone(),
            blood_type: client.profile.blood_type,
            status: client.profile.status,
            health_conditions: client.intake_data.health_conditions.clone(),
            allergies: client.intake_data.allergies.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutPlanParams {
    pub age: String,
    pub gender: String,
    pub experience: String,
    pub goal: String,
    pub days_per_week: String,
    pub available_equipment: String,
    pub status: EnhancementStatus,
    pub injuries: String,
}

impl WorkoutPlanParams {
    pub fn from_client(client: &Client, days_per_week: String, available_equipment: String) -> Self {
        Self {
            age: client.profile.age.clone(),
            gender: format!("{:?}", client.profile.gender).to_lowercase(),
            experience: format!("{:?}", client.profile.experience).to_lowercase(),
            goal: client.goal.clone(),
            days_per_week,
            available_equipment,
            status: client.profile.status,
            injuries: client.intake_data.injuries.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupplementParams {
    pub age: String,
    pub gender: String,
    pub goal: String,
    pub health_info: String,
    pub blood_type: Option<BloodType>,
}

#[derive(Debug, Clone)]
pub struct CheatMealParams {
    pub cravings: String,
    pub dietary_restrictions: String,
}

/// A single craving-driven meal with healthier substitutions. Advisory
/// output, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheatMeal {
    pub meal_name: String,
    pub description: String,
    pub healthier_alternatives: Vec<String>,
    pub portion_control_tips: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePrice {
    #[serde(rename = "storeName")]
    pub store_name: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: String,
    #[serde(rename = "storePrices")]
    pub store_prices: Vec<StorePrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryCategory {
    pub category: String,
    pub items: Vec<GroceryItem>,
}

/// Categorized shopping list derived from one meal plan, with indicative
/// store prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryList {
    pub categories: Vec<GroceryCategory>,
    #[serde(rename = "shoppingTips")]
    pub shopping_tips: String,
    pub disclaimer: String,
}

/// External content synthesis, treated as a black box that either returns
/// plan-shaped structured content or fails with a single message. No retry.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn meal_plan(&self, params: &MealPlanParams) -> Result<MealPlanContent, GenerationError>;

    async fn workout_plan(
        &self,
        params: &WorkoutPlanParams,
    ) -> Result<WorkoutPlanContent, GenerationError>;

    async fn supplement_stack(
        &self,
        params: &SupplementParams,
    ) -> Result<SupplementStack, GenerationError>;

    async fn analyze_bloodwork(
        &self,
        text: &str,
        blood_type: Option<BloodType>,
    ) -> Result<String, GenerationError>;

    /// Markdown summary of one client's recent progress, holistic state,
    /// and outstanding payments, for the coach's morning review.
    async fn daily_briefing(&self, client: &Client) -> Result<String, GenerationError>;

    async fn grocery_list(&self, plan: &MealPlan) -> Result<GroceryList, GenerationError>;

    async fn cheat_meal(&self, params: &CheatMealParams) -> Result<CheatMeal, GenerationError>;

    /// Plain-language interaction review for a free-text compound list.
    async fn drug_interactions(&self, compounds: &str) -> Result<String, GenerationError>;
}

/// Stands in when no API key is configured; every call fails with the same
/// caller-visible message.
pub struct DisabledGenerator;

#[async_trait]
impl PlanGenerator for DisabledGenerator {
    async fn meal_plan(&self, _: &MealPlanParams) -> Result<MealPlanContent, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn workout_plan(
        &self,
        _: &WorkoutPlanParams,
    ) -> Result<WorkoutPlanContent, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn supplement_stack(
        &self,
        _: &SupplementParams,
    ) -> Result<SupplementStack, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn analyze_bloodwork(
        &self,
        _: &str,
        _: Option<BloodType>,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn daily_briefing(&self, _: &Client) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn grocery_list(&self, _: &MealPlan) -> Result<GroceryList, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn cheat_meal(&self, _: &CheatMealParams) -> Result<CheatMeal, GenerationError> {
        Err(GenerationError::Disabled)
    }

    async fn drug_interactions(&self, _: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }
}
