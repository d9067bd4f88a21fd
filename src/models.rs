use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

/// Current time as an RFC 3339 string, the timestamp format used everywhere
/// at the API boundary. The fraction is always exactly three digits, so the
/// string form sorts the same way the instants do; the live store relies on
/// that when it orders by the text column.
pub fn now_rfc3339() -> String {
    format_rfc3339(OffsetDateTime::now_utc())
}

fn format_rfc3339(t: OffsetDateTime) -> String {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    t.format(&format)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00.000Z"))
}

pub fn unix_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Prospect,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    A,
    B,
    AB,
    O,
    Unknown,
}

/// Whether the client trains natural or uses performance enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementStatus {
    Natural,
    Enhanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub sms: bool,
    #[serde(rename = "inApp")]
    pub in_app: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProfile {
    pub age: String,
    pub gender: Gender,
    pub weight: String,
    pub height: String,
    pub experience: ExperienceLevel,
    #[serde(rename = "activityLevel")]
    pub activity_level: ActivityLevel,
    #[serde(rename = "bloodType", skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    pub status: EnhancementStatus,
    #[serde(rename = "notificationPreferences")]
    pub notification_preferences: NotificationPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeData {
    pub injuries: String,
    pub meds: String,
    pub diet: String,
    #[serde(rename = "workSchedule")]
    pub work_schedule: String,
    #[serde(rename = "healthConditions")]
    pub health_conditions: String,
    pub allergies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressLog {
    pub date: String,
    pub weight: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macronutrients {
    pub protein: String,
    pub carbohydrates: String,
    pub fat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub description: String,
    pub calories: u32,
    pub macronutrients: Macronutrients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: String,
    pub status: PlanStatus,
    pub daily_calories_goal: u32,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub rest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub day: u32,
    pub focus: String,
    pub exercises: Vec<Exercise>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: String,
    pub status: PlanStatus,
    pub plan_name: String,
    pub weekly_schedule: Vec<WorkoutDay>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedPlans {
    #[serde(rename = "mealPlans")]
    pub meal_plans: Vec<MealPlan>,
    #[serde(rename = "workoutPlans")]
    pub workout_plans: Vec<WorkoutPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub name: String,
    pub dosage: String,
    pub timing: String,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementStack {
    pub goal: String,
    pub stack: Vec<Supplement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    Paid,
    Pending,
    Overdue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub service: String,
    pub amount: f64,
    pub status: PaymentState,
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Coach,
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Communication {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodworkStatus {
    #[serde(rename = "Pending Review")]
    PendingReview,
    Reviewed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodworkSubmission {
    pub date: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    pub status: BloodworkStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientTestimonial {
    pub date: String,
    pub rating: u8,
    pub text: String,
    pub status: TestimonialStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationStatus {
    Eligible,
    #[serde(rename = "Ineligible - Temporary")]
    IneligibleTemporary,
    #[serde(rename = "Ineligible - Permanent")]
    IneligiblePermanent,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodDonationInfo {
    pub status: DonationStatus,
    #[serde(rename = "lastChecked")]
    pub last_checked: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolisticHealth {
    #[serde(rename = "sleepQuality")]
    pub sleep_quality: String,
    #[serde(rename = "stressLevel")]
    pub stress_level: String,
    #[serde(rename = "energyLevel")]
    pub energy_level: String,
    #[serde(rename = "herbalLog")]
    pub herbal_log: String,
}

/// The sole aggregate root. Every nested collection and sub-record is owned
/// exclusively by its client; nothing here is shared across clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub created_at: String,
    pub name: String,
    pub email: String,
    pub goal: String,
    pub status: ClientStatus,
    #[serde(rename = "paymentStatus", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    pub profile: PhysicalProfile,
    #[serde(rename = "intakeData")]
    pub intake_data: IntakeData,
    pub progress: Vec<ProgressLog>,
    #[serde(rename = "generatedPlans")]
    pub generated_plans: GeneratedPlans,
    pub payments: Vec<Payment>,
    pub communication: Communication,
    #[serde(rename = "bloodworkHistory")]
    pub bloodwork_history: Vec<BloodworkSubmission>,
    #[serde(rename = "clientTestimonials")]
    pub client_testimonials: Vec<ClientTestimonial>,
    #[serde(rename = "bloodDonationStatus")]
    pub blood_donation_status: BloodDonationInfo,
    #[serde(rename = "holisticHealth")]
    pub holistic_health: HolisticHealth,
}

/// A client as supplied on creation: everything but the store-assigned
/// identity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub goal: String,
    pub status: ClientStatus,
    #[serde(rename = "paymentStatus", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    pub profile: PhysicalProfile,
    #[serde(rename = "intakeData")]
    pub intake_data: IntakeData,
    #[serde(default)]
    pub progress: Vec<ProgressLog>,
    #[serde(rename = "generatedPlans", default)]
    pub generated_plans: GeneratedPlans,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub communication: Communication,
    #[serde(rename = "bloodworkHistory", default)]
    pub bloodwork_history: Vec<BloodworkSubmission>,
    #[serde(rename = "clientTestimonials", default)]
    pub client_testimonials: Vec<ClientTestimonial>,
    #[serde(rename = "bloodDonationStatus")]
    pub blood_donation_status: BloodDonationInfo,
    #[serde(rename = "holisticHealth")]
    pub holistic_health: HolisticHealth,
}

impl NewClient {
    /// Attach store-assigned identity to the payload. The only place a
    /// client id or creation timestamp is ever minted.
    pub fn into_client(self, id: String, created_at: String) -> Client {
        Client {
            id,
            created_at,
            name: self.name,
            email: self.email,
            goal: self.goal,
            status: self.status,
            payment_status: self.payment_status,
            profile: self.profile,
            intake_data: self.intake_data,
            progress: self.progress,
            generated_plans: self.generated_plans,
            payments: self.payments,
            communication: self.communication,
            bloodwork_history: self.bloodwork_history,
            client_testimonials: self.client_testimonials,
            blood_donation_status: self.blood_donation_status,
            holistic_health: self.holistic_health,
        }
    }
}
