use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::validation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Contacted,
    Resolved,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 3] = [
        SubmissionStatus::New,
        SubmissionStatus::Contacted,
        SubmissionStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Contacted => "contacted",
            SubmissionStatus::Resolved => "resolved",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "new" => Some(SubmissionStatus::New),
            "contacted" => Some(SubmissionStatus::Contacted),
            "resolved" => Some(SubmissionStatus::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether list queries include rows switched off by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    ActiveOnly,
    All,
}

impl Visibility {
    pub(crate) fn includes_inactive(self) -> bool {
        matches!(self, Visibility::All)
    }
}

fn default_true() -> bool {
    true
}

fn default_rating() -> i64 {
    5
}

fn default_submission_type() -> String {
    "inquiry".to_string()
}

// ---- users ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Fields written on sign-in. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpsertUser {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Option<Role>,
    pub last_signed_in: Option<DateTime<Utc>>,
}

// ---- page content ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub id: i64,
    pub section: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub metadata: Option<String>,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageContent {
    /// Parsed `metadata`, or `Null` when absent or unparseable.
    pub fn metadata_value(&self) -> serde_json::Value {
        self.metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageContentPatch {
    #[validate(custom(function = "validation::not_blank"))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    #[validate(custom(function = "validation::json_text"))]
    pub metadata: Option<String>,
}

impl PageContentPatch {
    pub fn apply(self, row: &mut PageContent) {
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            row.subtitle = Some(subtitle);
        }
        if let Some(content) = self.content {
            row.content = Some(content);
        }
        if let Some(cta_text) = self.cta_text {
            row.cta_text = Some(cta_text);
        }
        if let Some(cta_link) = self.cta_link {
            row.cta_link = Some(cta_link);
        }
        if let Some(metadata) = self.metadata {
            row.metadata = Some(metadata);
        }
    }
}

// ---- services ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub gradient_from: Option<String>,
    pub gradient_to: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[validate(custom(function = "validation::not_blank"))]
    pub name: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[validate(custom(function = "validation::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: Option<String>,
    pub icon: Option<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: Option<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl ServicePatch {
    pub fn apply(self, row: &mut Service) {
        if let Some(name) = self.name {
            row.name = name;
        }
        if let Some(description) = self.description {
            row.description = description;
        }
        if let Some(icon) = self.icon {
            row.icon = Some(icon);
        }
        if let Some(from) = self.gradient_from {
            row.gradient_from = Some(from);
        }
        if let Some(to) = self.gradient_to {
            row.gradient_to = Some(to);
        }
        if let Some(order) = self.display_order {
            row.display_order = order;
        }
        if let Some(active) = self.is_active {
            row.is_active = active;
        }
    }
}

// ---- solution tiers ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionTier {
    pub id: i64,
    pub tier_id: String,
    pub badge: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub cta_text: String,
    pub gradient_from: String,
    pub gradient_to: String,
    pub features: Vec<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SolutionTier {
    /// Tiers without a fixed price read "Custom" or "Custom Pricing".
    pub fn is_custom_priced(&self) -> bool {
        self.price.trim().to_ascii_lowercase().starts_with("custom")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSolutionTier {
    #[validate(custom(function = "validation::not_blank"))]
    pub tier_id: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub badge: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub name: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub price: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub cta_text: String,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: String,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: String,
    #[serde(default)]
    #[validate(custom(function = "validation::non_empty_items"))]
    pub features: Vec<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SolutionTierPatch {
    #[validate(custom(function = "validation::not_blank"))]
    pub badge: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub price: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub cta_text: Option<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: Option<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: Option<String>,
    #[validate(custom(function = "validation::non_empty_items"))]
    pub features: Option<Vec<String>>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl SolutionTierPatch {
    pub fn apply(self, row: &mut SolutionTier) {
        if let Some(badge) = self.badge {
            row.badge = badge;
        }
        if let Some(name) = self.name {
            row.name = name;
        }
        if let Some(description) = self.description {
            row.description = description;
        }
        if let Some(price) = self.price {
            row.price = price;
        }
        if let Some(cta_text) = self.cta_text {
            row.cta_text = cta_text;
        }
        if let Some(from) = self.gradient_from {
            row.gradient_from = from;
        }
        if let Some(to) = self.gradient_to {
            row.gradient_to = to;
        }
        if let Some(features) = self.features {
            row.features = features;
        }
        if let Some(order) = self.display_order {
            row.display_order = order;
        }
        if let Some(active) = self.is_active {
            row.is_active = active;
        }
    }
}

// ---- process steps ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub id: i64,
    pub step_number: i64,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub details: Vec<String>,
    pub gradient_from: String,
    pub gradient_to: String,
    pub is_active: bool,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProcessStep {
    #[validate(range(min = 1))]
    pub step_number: i64,
    #[validate(custom(function = "validation::not_blank"))]
    pub title: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub duration: String,
    #[serde(default)]
    #[validate(custom(function = "validation::non_empty_items"))]
    pub details: Vec<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: String,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepPatch {
    #[validate(range(min = 1))]
    pub step_number: Option<i64>,
    #[validate(custom(function = "validation::not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub duration: Option<String>,
    #[validate(custom(function = "validation::non_empty_items"))]
    pub details: Option<Vec<String>>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_from: Option<String>,
    #[validate(custom(function = "validation::hex_color"))]
    pub gradient_to: Option<String>,
    pub is_active: Option<bool>,
}

impl ProcessStepPatch {
    pub fn apply(self, row: &mut ProcessStep) {
        if let Some(number) = self.step_number {
            row.step_number = number;
        }
        if let Some(title) = self.title {
            row.title = title;
        }
        if let Some(description) = self.description {
            row.description = description;
        }
        if let Some(duration) = self.duration {
            row.duration = duration;
        }
        if let Some(details) = self.details {
            row.details = details;
        }
        if let Some(from) = self.gradient_from {
            row.gradient_from = from;
        }
        if let Some(to) = self.gradient_to {
            row.gradient_to = to;
        }
        if let Some(active) = self.is_active {
            row.is_active = active;
        }
    }
}

// ---- faq ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub display_order: i64,
    pub is_active: bool,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFaqItem {
    #[validate(custom(function = "validation::not_blank"))]
    pub category: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub question: String,
    #[validate(custom(function = "validation::not_blank"))]
    pub answer: String,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaqItemPatch {
    #[validate(custom(function = "validation::not_blank"))]
    pub category: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub question: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub answer: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}

impl FaqItemPatch {
    pub fn apply(self, row: &mut FaqItem) {
        // Grouping on the landing page compares categories verbatim.
        if let Some(category) = self.category {
            row.category = category.trim().to_string();
        }
        if let Some(question) = self.question {
            row.question = question;
        }
        if let Some(answer) = self.answer {
            row.answer = answer;
        }
        if let Some(order) = self.display_order {
            row.display_order = order;
        }
        if let Some(active) = self.is_active {
            row.is_active = active;
        }
    }
}

// ---- testimonials ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub rating: i64,
    pub display_order: i64,
    pub is_active: bool,
    pub updated_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    #[validate(custom(function = "validation::not_blank"))]
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub content: String,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// ---- contact submissions ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: SubmissionStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContactSubmission {
    #[validate(custom(function = "validation::not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[validate(custom(function = "validation::not_blank"))]
    pub message: String,
    #[serde(rename = "type", default = "default_submission_type")]
    pub kind: String,
}

impl NewContactSubmission {
    /// Trim text and store empty optional fields as NULL.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: validation::blank_to_none(self.phone),
            company: validation::blank_to_none(self.company),
            message: self.message,
            kind: match self.kind.trim() {
                "" => default_submission_type(),
                kind => kind.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatusUpdate {
    pub status: SubmissionStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

/// Row counts per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCounts {
    pub users: i64,
    pub page_content: i64,
    pub services: i64,
    pub solution_tiers: i64,
    pub process_steps: i64,
    pub faq_items: i64,
    pub testimonials: i64,
    pub contact_submissions: i64,
}

impl TableCounts {
    /// True when none of the marketing tables hold rows.
    pub fn content_is_empty(&self) -> bool {
        self.page_content == 0
            && self.services == 0
            && self.solution_tiers == 0
            && self.process_steps == 0
            && self.faq_items == 0
    }
}
