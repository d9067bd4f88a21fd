//! Demo-mode seed data. Three clients covering the interesting shapes: an
//! active client with approved plans, an untouched prospect, and an enhanced
//! athlete with bloodwork waiting on review.

use crate::models::*;

fn empty_intake() -> IntakeData {
    IntakeData {
        injuries: String::new(),
        meds: String::new(),
        diet: String::new(),
        work_schedule: String::new(),
        health_conditions: String::new(),
        allergies: String::new(),
    }
}

fn empty_holistic() -> HolisticHealth {
    HolisticHealth {
        sleep_quality: String::new(),
        stress_level: String::new(),
        energy_level: String::new(),
        herbal_log: String::new(),
    }
}

pub fn demo_clients() -> Vec<Client> {
    // Newest first; the demo store keeps the list in that order.
    vec![leo(), dana(), marcus()]
}

fn marcus() -> Client {
    Client {
        id: "demo-client-1".into(),
        created_at: "2023-01-15T09:00:00Z".into(),
        name: "Marcus Webb".into(),
        email: "marcus.w@example.com".into(),
        goal: "Body recomposition: drop 8kg fat, add 4kg muscle".into(),
        status: ClientStatus::Active,
        payment_status: Some(PaymentStatus::Paid),
        profile: PhysicalProfile {
            age: "34".into(),
            gender: Gender::Male,
            weight: "92".into(),
            height: "182".into(),
            experience: ExperienceLevel::Intermediate,
            activity_level: ActivityLevel::ModeratelyActive,
            blood_type: Some(BloodType::O),
            status: EnhancementStatus::Natural,
            notification_preferences: NotificationPreferences {
                email: true,
                sms: false,
                in_app: true,
            },
        },
        intake_data: IntakeData {
            injuries: "None".into(),
            meds: "Daily multivitamin".into(),
            diet: "Prefers whole foods, avoids processed sugar".into(),
            work_schedule: "Mon-Fri, 9am-6pm desk job".into(),
            health_conditions: "None".into(),
            allergies: "None".into(),
        },
        progress: vec![
            ProgressLog {
                date: "2023-10-01T09:00:00Z".into(),
                weight: 92.0,
                notes: "Starting week 1.".into(),
            },
            ProgressLog {
                date: "2023-10-08T09:00:00Z".into(),
                weight: 91.4,
                notes: "Energy is good, sleep steady.".into(),
            },
        ],
        generated_plans: GeneratedPlans {
            meal_plans: vec![MealPlan {
                id: "mp-1".into(),
                status: PlanStatus::Approved,
                daily_calories_goal: 2400,
                meals: vec![
                    Meal {
                        name: "Breakfast".into(),
                        description: "Oatmeal with protein powder and berries".into(),
                        calories: 500,
                        macronutrients: Macronutrients {
                            protein: "40g".into(),
                            carbohydrates: "60g".into(),
                            fat: "10g".into(),
                        },
                    },
                    Meal {
                        name: "Dinner".into(),
                        description: "Salmon fillet with sweet potato and asparagus".into(),
                        calories: 700,
                        macronutrients: Macronutrients {
                            protein: "45g".into(),
                            carbohydrates: "55g".into(),
                            fat: "30g".into(),
                        },
                    },
                ],
            }],
            workout_plans: vec![WorkoutPlan {
                id: "wp-1".into(),
                status: PlanStatus::Approved,
                plan_name: "Intermediate Hypertrophy - Phase 1".into(),
                weekly_schedule: vec![WorkoutDay {
                    day: 1,
                    focus: "Push (chest, shoulders, triceps)".into(),
                    exercises: vec![Exercise {
                        name: "Bench Press".into(),
                        sets: "4".into(),
                        reps: "8-10".into(),
                        rest: "90s".into(),
                        notes: None,
                    }],
                    recovery_notes: Some("Stretch pecs and shoulders.".into()),
                }],
            }],
        },
        payments: vec![Payment {
            id: "payment-1".into(),
            service: "Monthly Coaching".into(),
            amount: 250.0,
            status: PaymentState::Paid,
            issue_date: "2023-10-01T00:00:00Z".into(),
            due_date: "2023-10-01T00:00:00Z".into(),
        }],
        communication: Communication::default(),
        bloodwork_history: vec![],
        client_testimonials: vec![],
        blood_donation_status: BloodDonationInfo {
            status: DonationStatus::Eligible,
            last_checked: "2023-09-20T00:00:00Z".into(),
            notes: Some("Cleared for donation.".into()),
        },
        holistic_health: HolisticHealth {
            sleep_quality: "Good, 7-8 hours".into(),
            stress_level: "Low".into(),
            energy_level: "High".into(),
            herbal_log: "None".into(),
        },
    }
}

fn dana() -> Client {
    Client {
        id: "demo-client-2".into(),
        created_at: "2023-05-10T09:00:00Z".into(),
        name: "Dana Kowalski".into(),
        email: "dana.k@example.com".into(),
        goal: "Not Set".into(),
        status: ClientStatus::Prospect,
        payment_status: Some(PaymentStatus::Unpaid),
        profile: PhysicalProfile {
            age: String::new(),
            gender: Gender::Female,
            weight: String::new(),
            height: String::new(),
            experience: ExperienceLevel::Beginner,
            activity_level: ActivityLevel::Sedentary,
            blood_type: Some(BloodType::Unknown),
            status: EnhancementStatus::Natural,
            notification_preferences: NotificationPreferences {
                email: true,
                sms: false,
                in_app: true,
            },
        },
        intake_data: empty_intake(),
        progress: vec![],
        generated_plans: GeneratedPlans::default(),
        payments: vec![],
        communication: Communication::default(),
        bloodwork_history: vec![],
        client_testimonials: vec![],
        blood_donation_status: BloodDonationInfo {
            status: DonationStatus::Unknown,
            last_checked: String::new(),
            notes: None,
        },
        holistic_health: empty_holistic(),
    }
}

fn leo() -> Client {
    Client {
        id: "demo-client-3".into(),
        created_at: "2023-08-02T09:00:00Z".into(),
        name: "Leo Ferreira".into(),
        email: "leo.f@example.com".into(),
        goal: "Contest prep for men's physique".into(),
        status: ClientStatus::Active,
        payment_status: Some(PaymentStatus::Paid),
        profile: PhysicalProfile {
            age: "28".into(),
            gender: Gender::Male,
            weight: "85".into(),
            height: "175".into(),
            experience: ExperienceLevel::Advanced,
            activity_level: ActivityLevel::VeryActive,
            blood_type: Some(BloodType::A),
            status: EnhancementStatus::Enhanced,
            notification_preferences: NotificationPreferences {
                email: true,
                sms: true,
                in_app: true,
            },
        },
        intake_data: IntakeData {
            injuries: "Left shoulder impingement, avoid direct overhead pressing".into(),
            meds: "TUDCA, fish oil".into(),
            diet: "Low carb, high protein".into(),
            work_schedule: "Variable, shift work".into(),
            health_conditions: "None".into(),
            allergies: "Lactose intolerant".into(),
        },
        progress: vec![ProgressLog {
            date: "2023-10-08T09:00:00Z".into(),
            weight: 85.8,
            notes: "Weight stalling, stress is high.".into(),
        }],
        generated_plans: GeneratedPlans::default(),
        payments: vec![
            Payment {
                id: "payment-2".into(),
                service: "Monthly Coaching".into(),
                amount: 250.0,
                status: PaymentState::Paid,
                issue_date: "2023-09-01T00:00:00Z".into(),
                due_date: "2023-09-01T00:00:00Z".into(),
            },
            Payment {
                id: "payment-3".into(),
                service: "Monthly Coaching".into(),
                amount: 250.0,
                status: PaymentState::Overdue,
                issue_date: "2023-10-01T00:00:00Z".into(),
                due_date: "2023-10-08T00:00:00Z".into(),
            },
        ],
        communication: Communication::default(),
        bloodwork_history: vec![BloodworkSubmission {
            date: "2023-09-25T00:00:00Z".into(),
            text: "Hematocrit: 53\nAST: 45\nALT: 50".into(),
            analysis: None,
            status: BloodworkStatus::PendingReview,
        }],
        client_testimonials: vec![],
        blood_donation_status: BloodDonationInfo {
            status: DonationStatus::IneligibleTemporary,
            last_checked: "2023-09-25T00:00:00Z".into(),
            notes: Some("Hematocrit too high, advised to donate blood.".into()),
        },
        holistic_health: HolisticHealth {
            sleep_quality: "Poor, 4-5 hours".into(),
            stress_level: "High".into(),
            energy_level: "Low".into(),
            herbal_log: "Ashwagandha 600mg".into(),
        },
    }
}
