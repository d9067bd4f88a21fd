use tracing::{debug, info};

use super::dto::{
    CheatMealRequest, GenerateRequest, GroceryListRequest, SupplementRequest,
};
use super::{DraftPlan, DraftStore, PlanKind};
use crate::clients::services::fetch_client;
use crate::error::ApiError;
use crate::generation::{
    CheatMeal, CheatMealParams, GroceryList, MealPlanParams, PlanGenerator, SupplementParams,
    WorkoutPlanParams,
};
use crate::models::{unix_millis, Client, MealPlan, PlanStatus, SupplementStack, WorkoutPlan};
use crate::store::ClientStore;

fn draft_id() -> String {
    format!("draft_{}", unix_millis())
}

fn plan_id() -> String {
    format!("plan_{}", unix_millis())
}

/// Synthesize a new draft for the client. Any previous undealt-with draft of
/// the same type is dropped without a trace; a generation failure leaves the
/// draft slot and the client's approved plans exactly as they were.
pub async fn generate_draft(
    store: &dyn ClientStore,
    drafts: &DraftStore,
    generator: &dyn PlanGenerator,
    client_id: &str,
    kind: PlanKind,
    req: GenerateRequest,
) -> Result<DraftPlan, ApiError> {
    let client = fetch_client(store, client_id).await?;

    let draft = match kind {
        PlanKind::Meal => {
            let params = MealPlanParams::from_client(&client, req.dietary_restrictions);
            let content = generator.meal_plan(&params).await?;
            DraftPlan::Meal(MealPlan {
                id: draft_id(),
                status: PlanStatus::Draft,
                daily_calories_goal: content.daily_calories_goal,
                meals: content.meals,
            })
        }
        PlanKind::Workout => {
            let params =
                WorkoutPlanParams::from_client(&client, req.days_per_week, req.available_equipment);
            let content = generator.workout_plan(&params).await?;
            DraftPlan::Workout(WorkoutPlan {
                id: draft_id(),
                status: PlanStatus::Draft,
                plan_name: content.plan_name,
                weekly_schedule: content.weekly_schedule,
            })
        }
    };

    debug!(client_id, ?kind, draft_id = draft.id(), "draft generated");
    drafts.put(client_id, draft.clone()).await;
    Ok(draft)
}

/// Field-level rework of the current draft. Same id, still a draft, still
/// unpersisted.
pub async fn edit_draft(
    drafts: &DraftStore,
    client_id: &str,
    kind: PlanKind,
    content: serde_json::Value,
) -> Result<DraftPlan, ApiError> {
    let current = drafts
        .get(client_id, kind)
        .await
        .ok_or(ApiError::NotFound("draft"))?;

    let bad_content = |e: serde_json::Error| ApiError::BadRequest(e.to_string());
    let edited = match current {
        DraftPlan::Meal(plan) => {
            let content: crate::generation::MealPlanContent =
                serde_json::from_value(content).map_err(bad_content)?;
            DraftPlan::Meal(MealPlan {
                id: plan.id,
                status: PlanStatus::Draft,
                daily_calories_goal: content.daily_calories_goal,
                meals: content.meals,
            })
        }
        DraftPlan::Workout(plan) => {
            let content: crate::generation::WorkoutPlanContent =
                serde_json::from_value(content).map_err(bad_content)?;
            DraftPlan::Workout(WorkoutPlan {
                id: plan.id,
                status: PlanStatus::Draft,
                plan_name: content.plan_name,
                weekly_schedule: content.weekly_schedule,
            })
        }
    };

    drafts.put(client_id, edited.clone()).await;
    Ok(edited)
}

/// Promote the current draft into the client's persisted collection: a fresh
/// id, status approved, one append through one store update. The draft slot
/// is cleared only after the update lands, so a store failure keeps the
/// draft intact for a retry.
pub async fn approve_draft(
    store: &dyn ClientStore,
    drafts: &DraftStore,
    client_id: &str,
    kind: PlanKind,
) -> Result<Client, ApiError> {
    let draft = drafts
        .get(client_id, kind)
        .await
        .ok_or(ApiError::NotFound("draft"))?;

    let mut client = fetch_client(store, client_id).await?;
    let approved_id = plan_id();
    match draft {
        DraftPlan::Meal(plan) => client.generated_plans.meal_plans.push(MealPlan {
            id: approved_id.clone(),
            status: PlanStatus::Approved,
            ..plan
        }),
        DraftPlan::Workout(plan) => client.generated_plans.workout_plans.push(WorkoutPlan {
            id: approved_id.clone(),
            status: PlanStatus::Approved,
            ..plan
        }),
    }

    let updated = store.update_client(client).await?;
    drafts.remove(client_id, kind).await;
    info!(client_id, ?kind, plan_id = %approved_id, "plan approved");
    Ok(updated)
}

/// Drop the draft without touching the store. Returns whether one existed.
pub async fn discard_draft(drafts: &DraftStore, client_id: &str, kind: PlanKind) -> bool {
    drafts.remove(client_id, kind).await.is_some()
}

/// Supplement stacks are advisory output, returned to the caller and never
/// persisted to the client record.
pub async fn generate_supplements(
    store: &dyn ClientStore,
    generator: &dyn PlanGenerator,
    client_id: &str,
    req: SupplementRequest,
) -> Result<SupplementStack, ApiError> {
    let client = fetch_client(store, client_id).await?;
    let mut health_info = format!(
        "Conditions: {}. Medications: {}. Allergies: {}.",
        client.intake_data.health_conditions, client.intake_data.meds, client.intake_data.allergies
    );
    if !req.health_info.is_empty() {
        health_info.push(' ');
        health_info.push_str(&req.health_info);
    }
    let params = SupplementParams {
        age: client.profile.age.clone(),
        gender: format!("{:?}", client.profile.gender).to_lowercase(),
        goal: client.goal.clone(),
        health_info,
        blood_type: client.profile.blood_type,
    };
    Ok(generator.supplement_stack(&params).await?)
}

/// One-client coach briefing, synthesized fresh each call.
pub async fn generate_briefing(
    store: &dyn ClientStore,
    generator: &dyn PlanGenerator,
    client_id: &str,
) -> Result<String, ApiError> {
    let client = fetch_client(store, client_id).await?;
    Ok(generator.daily_briefing(&client).await?)
}

/// Shopping list for one of the client's approved meal plans. Like the
/// supplement stack, the result goes back to the caller and is never stored.
pub async fn generate_grocery_list(
    store: &dyn ClientStore,
    generator: &dyn PlanGenerator,
    client_id: &str,
    req: GroceryListRequest,
) -> Result<GroceryList, ApiError> {
    let client = fetch_client(store, client_id).await?;
    let plan = client
        .generated_plans
        .meal_plans
        .iter()
        .find(|p| p.id == req.plan_id)
        .ok_or(ApiError::NotFound("meal plan"))?;
    Ok(generator.grocery_list(plan).await?)
}

pub async fn generate_cheat_meal(
    generator: &dyn PlanGenerator,
    req: CheatMealRequest,
) -> Result<CheatMeal, ApiError> {
    if req.cravings.trim().is_empty() {
        return Err(ApiError::BadRequest("cravings are required".into()));
    }
    let params = CheatMealParams {
        cravings: req.cravings,
        dietary_restrictions: req.dietary_restrictions,
    };
    Ok(generator.cheat_meal(&params).await?)
}

pub async fn analyze_interactions(
    generator: &dyn PlanGenerator,
    compounds: String,
) -> Result<String, ApiError> {
    if compounds.trim().is_empty() {
        return Err(ApiError::BadRequest("a compound list is required".into()));
    }
    Ok(generator.drug_interactions(&compounds).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{
        GenerationError, MealPlanContent, WorkoutPlanContent,
    };
    use crate::models::*;
    use crate::store::{ClientStore, DemoStore};
    use async_trait::async_trait;

    struct StubGenerator {
        calories: u32,
    }

    #[async_trait]
    impl PlanGenerator for StubGenerator {
        async fn meal_plan(&self, _: &MealPlanParams) -> Result<MealPlanContent, GenerationError> {
            Ok(MealPlanContent {
                daily_calories_goal: self.calories,
                meals: vec![Meal {
                    name: "Breakfast".into(),
                    description: "Eggs and oats".into(),
                    calories: self.calories / 3,
                    macronutrients: Macronutrients {
                        protein: "40g".into(),
                        carbohydrates: "60g".into(),
                        fat: "15g".into(),
                    },
                }],
            })
        }

        async fn workout_plan(
            &self,
            _: &WorkoutPlanParams,
        ) -> Result<WorkoutPlanContent, GenerationError> {
            Ok(WorkoutPlanContent {
                plan_name: "Push Pull Legs".into(),
                weekly_schedule: vec![WorkoutDay {
                    day: 1,
                    focus: "Push".into(),
                    exercises: vec![],
                    recovery_notes: None,
                }],
            })
        }

        async fn supplement_stack(
            &self,
            params: &SupplementParams,
        ) -> Result<SupplementStack, GenerationError> {
            Ok(SupplementStack {
                goal: params.goal.clone(),
                stack: vec![],
            })
        }

        async fn analyze_bloodwork(
            &self,
            _: &str,
            _: Option<BloodType>,
        ) -> Result<String, GenerationError> {
            Ok("All values in range.".into())
        }

        async fn daily_briefing(&self, client: &Client) -> Result<String, GenerationError> {
            Ok(format!("Briefing for {}.", client.name))
        }

        async fn grocery_list(&self, plan: &MealPlan) -> Result<GroceryList, GenerationError> {
            Ok(GroceryList {
                categories: vec![],
                shopping_tips: format!("Shop for {} meals.", plan.meals.len()),
                disclaimer: "Prices are estimates.".into(),
            })
        }

        async fn cheat_meal(&self, p: &CheatMealParams) -> Result<CheatMeal, GenerationError> {
            Ok(CheatMeal {
                meal_name: format!("Healthy {}", p.cravings),
                description: "Lean take on the craving.".into(),
                healthier_alternatives: vec!["whole-grain base".into()],
                portion_control_tips: "One serving, plated.".into(),
            })
        }

        async fn drug_interactions(&self, _: &str) -> Result<String, GenerationError> {
            Ok("No notable interactions.".into())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl PlanGenerator for FailingGenerator {
        async fn meal_plan(&self, _: &MealPlanParams) -> Result<MealPlanContent, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn workout_plan(
            &self,
            _: &WorkoutPlanParams,
        ) -> Result<WorkoutPlanContent, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn supplement_stack(
            &self,
            _: &SupplementParams,
        ) -> Result<SupplementStack, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn analyze_bloodwork(
            &self,
            _: &str,
            _: Option<BloodType>,
        ) -> Result<String, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn daily_briefing(&self, _: &Client) -> Result<String, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn grocery_list(&self, _: &MealPlan) -> Result<GroceryList, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn cheat_meal(&self, _: &CheatMealParams) -> Result<CheatMeal, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
        async fn drug_interactions(&self, _: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Malformed("upstream flaked".into()))
        }
    }

    async fn first_client_id(store: &DemoStore) -> String {
        store.list_clients().await.expect("list")[0].id.clone()
    }

    #[tokio::test]
    async fn generated_draft_is_not_persisted() {
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;

        let before = fetch_client(&store, &id).await.expect("fetch");
        let draft = generate_draft(
            &store,
            &drafts,
            &StubGenerator { calories: 2400 },
            &id,
            PlanKind::Meal,
            GenerateRequest::default(),
        )
        .await
        .expect("generate");

        assert!(draft.id().starts_with("draft_"));
        let after = fetch_client(&store, &id).await.expect("fetch");
        assert_eq!(before, after, "generation never touches the store");
    }

    #[tokio::test]
    async fn edit_then_approve_appends_exactly_one_approved_plan() {
        // The worked scenario: 2400 kcal draft edited to 2200, then approved.
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;
        let prior_plans = fetch_client(&store, &id)
            .await
            .expect("fetch")
            .generated_plans
            .meal_plans;

        let draft = generate_draft(
            &store,
            &drafts,
            &StubGenerator { calories: 2400 },
            &id,
            PlanKind::Meal,
            GenerateRequest::default(),
        )
        .await
        .expect("generate");
        let draft_id = draft.id().to_string();

        let edited = edit_draft(
            &drafts,
            &id,
            PlanKind::Meal,
            serde_json::json!({ "daily_calories_goal": 2200, "meals": [] }),
        )
        .await
        .expect("edit");
        assert_eq!(edited.id(), draft_id, "editing keeps the draft id");

        let updated = approve_draft(&store, &drafts, &id, PlanKind::Meal)
            .await
            .expect("approve");

        let plans = &updated.generated_plans.meal_plans;
        assert_eq!(plans.len(), prior_plans.len() + 1);
        assert_eq!(&plans[..prior_plans.len()], &prior_plans[..], "prior elements untouched");

        let approved = plans.last().expect("appended plan");
        assert_eq!(approved.daily_calories_goal, 2200);
        assert_eq!(approved.status, PlanStatus::Approved);
        assert!(approved.id.starts_with("plan_"));
        assert_ne!(approved.id, draft_id);

        assert!(drafts.get(&id, PlanKind::Meal).await.is_none(), "draft slot cleared");
    }

    #[tokio::test]
    async fn regenerating_replaces_the_outstanding_draft() {
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;

        generate_draft(
            &store,
            &drafts,
            &StubGenerator { calories: 2400 },
            &id,
            PlanKind::Meal,
            GenerateRequest::default(),
        )
        .await
        .expect("first generate");
        generate_draft(
            &store,
            &drafts,
            &StubGenerator { calories: 1800 },
            &id,
            PlanKind::Meal,
            GenerateRequest::default(),
        )
        .await
        .expect("second generate");

        match drafts.get(&id, PlanKind::Meal).await.expect("draft") {
            DraftPlan::Meal(p) => assert_eq!(p.daily_calories_goal, 1800),
            DraftPlan::Workout(_) => panic!("wrong draft kind"),
        }
    }

    #[tokio::test]
    async fn meal_and_workout_drafts_are_independent_slots() {
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;
        let stub = StubGenerator { calories: 2000 };

        generate_draft(&store, &drafts, &stub, &id, PlanKind::Meal, GenerateRequest::default())
            .await
            .expect("meal draft");
        generate_draft(&store, &drafts, &stub, &id, PlanKind::Workout, GenerateRequest::default())
            .await
            .expect("workout draft");

        assert!(drafts.get(&id, PlanKind::Meal).await.is_some());
        assert!(drafts.get(&id, PlanKind::Workout).await.is_some());
    }

    #[tokio::test]
    async fn discard_never_mutates_persisted_plans() {
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;

        generate_draft(
            &store,
            &drafts,
            &StubGenerator { calories: 2400 },
            &id,
            PlanKind::Workout,
            GenerateRequest::default(),
        )
        .await
        .expect("generate");

        let before = fetch_client(&store, &id).await.expect("fetch");
        assert!(discard_draft(&drafts, &id, PlanKind::Workout).await);
        assert!(!discard_draft(&drafts, &id, PlanKind::Workout).await);

        let after = fetch_client(&store, &id).await.expect("fetch");
        assert_eq!(before, after);
        assert!(
            approve_draft(&store, &drafts, &id, PlanKind::Workout)
                .await
                .is_err(),
            "discarded draft leaves nothing to approve"
        );
    }

    #[tokio::test]
    async fn generation_failure_leaves_everything_untouched() {
        let store = DemoStore::seeded();
        let drafts = DraftStore::new();
        let id = first_client_id(&store).await;

        let before = fetch_client(&store, &id).await.expect("fetch");
        let err = generate_draft(
            &store,
            &drafts,
            &FailingGenerator,
            &id,
            PlanKind::Meal,
            GenerateRequest::default(),
        )
        .await;
        assert!(err.is_err());
        assert!(drafts.get(&id, PlanKind::Meal).await.is_none(), "no partial draft");
        assert_eq!(fetch_client(&store, &id).await.expect("fetch"), before);
    }

    #[tokio::test]
    async fn grocery_list_targets_one_approved_meal_plan() {
        let store = DemoStore::seeded();
        let before = fetch_client(&store, "demo-client-1").await.expect("fetch");

        let list = generate_grocery_list(
            &store,
            &StubGenerator { calories: 0 },
            "demo-client-1",
            GroceryListRequest {
                plan_id: "mp-1".into(),
            },
        )
        .await
        .expect("grocery list");
        assert!(list.shopping_tips.contains('2'), "built from the plan's two meals");

        let missing = generate_grocery_list(
            &store,
            &StubGenerator { calories: 0 },
            "demo-client-1",
            GroceryListRequest {
                plan_id: "mp-999".into(),
            },
        )
        .await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));

        let after = fetch_client(&store, "demo-client-1").await.expect("fetch");
        assert_eq!(before, after, "shopping lists are never stored");
    }

    #[tokio::test]
    async fn briefing_is_synthesized_from_the_record() {
        let store = DemoStore::seeded();
        let text = generate_briefing(&store, &StubGenerator { calories: 0 }, "demo-client-3")
            .await
            .expect("briefing");
        assert!(text.contains("Leo Ferreira"));
    }

    #[tokio::test]
    async fn cheat_meal_requires_a_craving() {
        let err = generate_cheat_meal(
            &StubGenerator { calories: 0 },
            CheatMealRequest {
                cravings: "  ".into(),
                dietary_restrictions: String::new(),
            },
        )
        .await;
        assert!(matches!(err, Err(ApiError::BadRequest(_))));

        let meal = generate_cheat_meal(
            &StubGenerator { calories: 0 },
            CheatMealRequest {
                cravings: "pizza".into(),
                dietary_restrictions: "lactose intolerant".into(),
            },
        )
        .await
        .expect("cheat meal");
        assert_eq!(meal.meal_name, "Healthy pizza");
    }

    #[tokio::test]
    async fn interaction_analysis_requires_compounds() {
        let err = analyze_interactions(&StubGenerator { calories: 0 }, "   ".into()).await;
        assert!(matches!(err, Err(ApiError::BadRequest(_))));

        let report =
            analyze_interactions(&StubGenerator { calories: 0 }, "Test E, Anavar".into())
                .await
                .expect("analysis");
        assert!(!report.is_empty());
    }

    #[tokio::test]
    async fn supplement_generation_is_transient() {
        let store = DemoStore::seeded();
        let id = first_client_id(&store).await;
        let before = fetch_client(&store, &id).await.expect("fetch");

        let stack = generate_supplements(
            &store,
            &StubGenerator { calories: 0 },
            &id,
            SupplementRequest::default(),
        )
        .await
        .expect("generate");
        assert_eq!(stack.goal, before.goal);
        assert_eq!(fetch_client(&store, &id).await.expect("fetch"), before);
    }
}
