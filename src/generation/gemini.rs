use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::{
    CheatMeal, CheatMealParams, GenerationError, GroceryList, MealPlanContent, MealPlanParams,
    PlanGenerator, SupplementParams, WorkoutPlanContent, WorkoutPlanParams,
};
use crate::models::{BloodType, Client, MealPlan, PaymentState, SupplementStack};

/// Gemini-style `generateContent` client. Structured calls ask for a JSON
/// response and deserialize the first candidate's text; a parse failure is
/// reported as malformed content, never retried.
pub struct GeminiGenerator {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiGenerator {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: String, want_json: bool) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if want_json {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        let response: GenerateResponse = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = extract_text(response)?;
        debug!(chars = text.len(), "generation response received");
        Ok(text)
    }

    async fn generate_json<T: DeserializeOwned>(&self, prompt: String) -> Result<T, GenerationError> {
        let text = self.generate(prompt, true).await?;
        serde_json::from_str(text.trim()).map_err(|e| GenerationError::Malformed(e.to_string()))
    }
}

fn extract_text(response: GenerateResponse) -> Result<String, GenerationError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| GenerationError::Malformed("response carried no content".into()))
}

fn blood_type_note(blood_type: Option<BloodType>) -> String {
    match blood_type {
        Some(bt) if bt != BloodType::Unknown => {
            format!("The client's blood type is {bt:?}; factor it into the guidance.")
        }
        _ => String::new(),
    }
}

#[async_trait]
impl PlanGenerator for GeminiGenerator {
    async fn meal_plan(&self, p: &MealPlanParams) -> Result<MealPlanContent, GenerationError> {
        let prompt = format!(
            "Create a one-day meal plan for a {}-year-old {} ({}kg, {}cm, activity: {}). \
             Goal: '{}'. Dietary restrictions: '{}'. Work schedule: '{}'. \
             Health conditions: '{}'. Allergies: '{}'. Training status: {:?}. {} \
             Respond as JSON with fields daily_calories_goal (number) and meals \
             (array of {{name, description, calories, macronutrients: {{protein, carbohydrates, fat}}}}).",
            p.age,
            p.gender,
            p.weight,
            p.height,
            p.activity_level,
            p.goal,
            p.dietary_restrictions,
            p.work_schedule,
            p.health_conditions,
            p.allergies,
            p.status,
            blood_type_note(p.blood_type),
        );
        self.generate_json(prompt).await
    }

    async fn workout_plan(&self, p: &WorkoutPlanParams) -> Result<WorkoutPlanContent, GenerationError> {
        let prompt = format!(
            "Create a {}-day-per-week workout plan for a {}-year-old {} ({} lifter). \
             Goal: '{}'. Available equipment: '{}'. Injuries to work around: '{}'. \
             Training status: {:?}. Respond as JSON with fields plan_name and weekly_schedule \
             (array of {{day, focus, exercises: [{{name, sets, reps, rest, notes}}], recovery_notes}}).",
            p.days_per_week,
            p.age,
            p.gender,
            p.experience,
            p.goal,
            p.available_equipment,
            p.injuries,
            p.status,
        );
        self.generate_json(prompt).await
    }

    async fn supplement_stack(&self, p: &SupplementParams) -> Result<SupplementStack, GenerationError> {
        let prompt = format!(
            "Suggest a supplement stack for a {}-year-old {} with goal '{}'. \
             Health info: '{}'. {} Respond as JSON with fields goal and stack \
             (array of {{name, dosage, timing, purpose}}).",
            p.age,
            p.gender,
            p.goal,
            p.health_info,
            blood_type_note(p.blood_type),
        );
        self.generate_json(prompt).await
    }

    async fn analyze_bloodwork(
        &self,
        text: &str,
        blood_type: Option<BloodType>,
    ) -> Result<String, GenerationError> {
        let prompt = format!(
            "Review the following bloodwork values for a fitness coaching client and \
             summarize anything notable in plain language, flagging values that warrant \
             a physician's attention. {} Bloodwork:\n{text}",
            blood_type_note(blood_type),
        );
        self.generate(prompt, false).await
    }

    async fn daily_briefing(&self, client: &Client) -> Result<String, GenerationError> {
        let recent_progress = client
            .progress
            .iter()
            .rev()
            .take(3)
            .map(|p| format!("- {}: {}kg, notes: {}", p.date, p.weight, p.notes))
            .collect::<Vec<_>>()
            .join("\n");
        let payments_due = client
            .payments
            .iter()
            .filter(|p| p.status != PaymentState::Paid)
            .map(|p| format!("- ${} due {} ({:?})", p.amount, p.due_date, p.status))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "You are a coaching assistant. Write a concise daily briefing in markdown \
             for the head coach about one client: a one-sentence momentum summary, \
             2-3 key observations from the data, and one specific, ready-to-send \
             check-in message referencing a real data point.\n\
             Name: {}\nGoal: {}\nStatus: {:?}\n\
             Recent progress:\n{}\n\
             Sleep: {}. Stress: {}. Energy: {}.\n\
             Outstanding payments:\n{}",
            client.name,
            client.goal,
            client.status,
            if recent_progress.is_empty() { "none logged" } else { &recent_progress },
            client.holistic_health.sleep_quality,
            client.holistic_health.stress_level,
            client.holistic_health.energy_level,
            if payments_due.is_empty() { "none" } else { &payments_due },
        );
        self.generate(prompt, false).await
    }

    async fn grocery_list(&self, plan: &MealPlan) -> Result<GroceryList, GenerationError> {
        let meals = plan
            .meals
            .iter()
            .map(|m| format!("{}: {}", m.name, m.description))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "From this one-day meal plan, build a categorized grocery list for one \
             person. Extract the unique ingredients, consolidate quantities, and give \
             each item 2-3 realistic prices from named US grocery chains. Group items \
             into store categories such as Produce, Protein, Pantry. Respond as JSON \
             with fields categories (array of {{category, items: [{{name, quantity, \
             storePrices: [{{storeName, price}}]}}]}}), shoppingTips, and disclaimer \
             (that prices are estimates and vary by location and store).\n\
             Meal plan:\n{meals}"
        );
        self.generate_json(prompt).await
    }

    async fn cheat_meal(&self, p: &CheatMealParams) -> Result<CheatMeal, GenerationError> {
        let prompt = format!(
            "Design a single healthier cheat meal for someone craving '{}' with \
             dietary restrictions '{}'. It should satisfy the craving using healthier \
             ingredient swaps. Respond as JSON with fields meal_name, description \
             (including preparation), healthier_alternatives (array of strings), and \
             portion_control_tips.",
            p.cravings, p.dietary_restrictions,
        );
        self.generate_json(prompt).await
    }

    async fn drug_interactions(&self, compounds: &str) -> Result<String, GenerationError> {
        let prompt = format!(
            "Analyze this list of compounds for potential drug interactions in an \
             enhanced bodybuilding context. Identify interacting pairs or groups, \
             describe the nature of each interaction, and order them by severity. \
             Begin and end the response with this exact disclaimer: \"This is for \
             informational purposes only, is not medical advice, and a qualified \
             healthcare professional must be consulted. The information provided may \
             be incomplete or inaccurate.\"\n\
             Compounds:\n{compounds}"
        );
        self.generate(prompt, false).await
    }
}
