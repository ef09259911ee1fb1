//! Form wizards: the four-step booking request, the landing-page lead
//! capture and the single-step package inquiry.
//!
//! Browsers post the whole wizard state back on every step (hidden fields
//! for answers already given), so each transition is a pure function of the
//! posted form. Handlers only persist the submission a finished wizard
//! produces.

use inceptum_content::{find_package, validation, NewContactSubmission};
use serde::{Deserialize, Serialize};

pub const BOOKING_STEPS: u8 = 4;

pub const TYPE_BOOKING: &str = "booking_request";
pub const TYPE_STRATEGY_SESSION: &str = "strategy_session";
pub const TYPE_PACKAGE_INQUIRY: &str = "package_inquiry";

pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_STORE_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const LEGAL_STATUS: &[Choice] = &[
    choice("starting", "I'm just starting out (No license yet)"),
    choice("existing", "I have an existing license but need to scale/renew"),
    choice("international", "I'm an international founder looking to expand to Dubai"),
];

pub const HURDLES: &[Choice] = &[
    choice("licensing", "Trade Licensing & Legalities"),
    choice("banking", "Banking & Financial Setup"),
    choice("visas", "Visas & Employee Onboarding"),
];

pub const DIGITAL_PRESENCE: &[Choice] = &[
    choice("none", "No, I need a website and brand from scratch"),
    choice("existing", "Yes, but it isn't converting/generating leads"),
    choice("scaling", "Yes, and I'm ready to scale with SEO/Ads"),
];

pub const GROWTH_BUDGET: &[Choice] = &[
    choice("under2k", "Under $2,000"),
    choice("2k5k", "$2,000 - $5,000"),
    choice("5kplus", "$5,000+"),
];

pub const TIMEFRAME: &[Choice] = &[
    choice("urgent", "As soon as possible (Under 30 days)"),
    choice("months", "Within 1-3 months"),
    choice("research", "Just researching for now"),
];

/// The option code if `value` names one of `options`.
fn known(options: &[Choice], value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    options
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.value.to_string())
}

fn checked(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}

// ---- booking ----

/// Raw booking form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPost {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub legal_status: Option<String>,
    #[serde(default)]
    pub hurdle_licensing: Option<String>,
    #[serde(default)]
    pub hurdle_banking: Option<String>,
    #[serde(default)]
    pub hurdle_visas: Option<String>,
    #[serde(default)]
    pub digital_presence: Option<String>,
    #[serde(default)]
    pub growth_budget: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Next,
    Back,
    Submit,
}

impl BookingAction {
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some("back") => BookingAction::Back,
            Some("submit") => BookingAction::Submit,
            _ => BookingAction::Next,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingAnswers {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub legal_status: Option<String>,
    pub operational_hurdles: Vec<String>,
    pub digital_presence: Option<String>,
    pub growth_budget: Option<String>,
    pub timeframe: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingWizard {
    pub step: u8,
    pub answers: BookingAnswers,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self {
            step: 1,
            answers: BookingAnswers::default(),
        }
    }
}

/// What the handler should do after a booking post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Render {
        wizard: BookingWizard,
        error: Option<&'static str>,
    },
    /// Persist the submission. The wizard is kept for re-rendering the last
    /// step should that fail.
    Complete {
        wizard: BookingWizard,
        submission: NewContactSubmission,
    },
}

impl BookingPost {
    pub fn into_wizard(self) -> (BookingWizard, BookingAction) {
        let step = self
            .step
            .as_deref()
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(1)
            .clamp(1, BOOKING_STEPS);

        let hurdles = [
            ("licensing", &self.hurdle_licensing),
            ("banking", &self.hurdle_banking),
            ("visas", &self.hurdle_visas),
        ]
        .iter()
        .filter(|(_, value)| checked(value))
        .map(|(code, _)| code.to_string())
        .collect();

        let answers = BookingAnswers {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            legal_status: known(LEGAL_STATUS, self.legal_status.as_deref()),
            operational_hurdles: hurdles,
            digital_presence: known(DIGITAL_PRESENCE, self.digital_presence.as_deref()),
            growth_budget: known(GROWTH_BUDGET, self.growth_budget.as_deref()),
            timeframe: known(TIMEFRAME, self.timeframe.as_deref()),
        };

        (
            BookingWizard { step, answers },
            BookingAction::parse(self.action.as_deref()),
        )
    }
}

impl BookingWizard {
    pub fn progress_percent(&self) -> u8 {
        ((self.step as f32 / BOOKING_STEPS as f32) * 100.0).round() as u8
    }

    pub fn validate_step(&self, step: u8) -> Result<(), &'static str> {
        let a = &self.answers;
        match step {
            1 => {
                if a.full_name.is_empty() {
                    return Err("Please enter your full name");
                }
                if a.email.is_empty() {
                    return Err("Please enter your email");
                }
                if !validation::is_email(&a.email) {
                    return Err(MSG_INVALID_EMAIL);
                }
                if a.phone.is_empty() {
                    return Err("Please enter your phone number");
                }
            }
            2 => {
                if a.legal_status.is_none() {
                    return Err("Please select your legal status");
                }
                if a.operational_hurdles.is_empty() {
                    return Err("Please select at least one operational hurdle");
                }
            }
            3 => {
                if a.digital_presence.is_none() {
                    return Err("Please select your digital presence status");
                }
                if a.growth_budget.is_none() {
                    return Err("Please select your growth budget");
                }
            }
            4 => {
                if a.timeframe.is_none() {
                    return Err("Please select your desired timeframe");
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn apply(mut self, action: BookingAction) -> BookingOutcome {
        match action {
            BookingAction::Back => {
                if self.step > 1 {
                    self.step -= 1;
                }
                BookingOutcome::Render {
                    wizard: self,
                    error: None,
                }
            }
            BookingAction::Next => match self.validate_step(self.step) {
                Ok(()) => {
                    if self.step < BOOKING_STEPS {
                        self.step += 1;
                    }
                    BookingOutcome::Render {
                        wizard: self,
                        error: None,
                    }
                }
                Err(message) => BookingOutcome::Render {
                    wizard: self,
                    error: Some(message),
                },
            },
            BookingAction::Submit => {
                // Earlier steps arrive as hidden fields, so all of them are
                // checked again.
                for step in 1..=BOOKING_STEPS {
                    if let Err(message) = self.validate_step(step) {
                        self.step = step;
                        return BookingOutcome::Render {
                            wizard: self,
                            error: Some(message),
                        };
                    }
                }
                BookingOutcome::Complete {
                    submission: self.submission(),
                    wizard: self,
                }
            }
        }
    }

    pub fn message(&self) -> String {
        let a = &self.answers;
        format!(
            "Strategy Session Request\n\nLegal Status: {}\nOperational Hurdles: {}\nDigital Presence: {}\nGrowth Budget: {}\nTimeframe: {}",
            a.legal_status.as_deref().unwrap_or_default(),
            a.operational_hurdles.join(", "),
            a.digital_presence.as_deref().unwrap_or_default(),
            a.growth_budget.as_deref().unwrap_or_default(),
            a.timeframe.as_deref().unwrap_or_default(),
        )
    }

    pub fn submission(&self) -> NewContactSubmission {
        NewContactSubmission {
            name: self.answers.full_name.clone(),
            email: self.answers.email.clone(),
            phone: Some(self.answers.phone.clone()),
            company: None,
            message: self.message(),
            kind: TYPE_BOOKING.to_string(),
        }
    }
}

// ---- lead capture ----

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStep {
    #[default]
    Initial,
    Package,
    Details,
    Success,
}

impl LeadStep {
    fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some("package") => LeadStep::Package,
            Some("details") => LeadStep::Details,
            Some("success") => LeadStep::Success,
            _ => LeadStep::Initial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadAction {
    /// Carries a package slug.
    SelectPackage(String),
    SelectLicense(bool),
    Back,
    Submit,
    None,
}

impl LeadAction {
    /// Actions are posted as `select_package:<slug>`, `select_license:yes|no`,
    /// `back` or `submit`.
    pub fn parse(input: Option<&str>) -> Self {
        let input = input.map(str::trim).unwrap_or_default();
        if let Some(slug) = input.strip_prefix("select_package:") {
            return LeadAction::SelectPackage(slug.to_string());
        }
        if let Some(answer) = input.strip_prefix("select_license:") {
            return LeadAction::SelectLicense(answer.eq_ignore_ascii_case("yes"));
        }
        match input {
            "back" => LeadAction::Back,
            "submit" => LeadAction::Submit,
            _ => LeadAction::None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadPost {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub package_interest: String,
    #[serde(default)]
    pub has_license: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadWizard {
    pub step: LeadStep,
    pub package_interest: String,
    pub has_license: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Render {
        wizard: LeadWizard,
        error: Option<&'static str>,
    },
    /// Persist the submission, then show the success step.
    Complete {
        wizard: LeadWizard,
        submission: NewContactSubmission,
    },
}

impl LeadPost {
    pub fn into_wizard(self) -> (LeadWizard, LeadAction) {
        let has_license = match self.has_license.trim() {
            "Yes" => "Yes",
            "No" => "No",
            _ => "",
        };
        (
            LeadWizard {
                step: LeadStep::parse(self.step.as_deref()),
                package_interest: self.package_interest.trim().to_string(),
                has_license: has_license.to_string(),
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: self.phone.trim().to_string(),
                company: self.company.trim().to_string(),
            },
            LeadAction::parse(self.action.as_deref()),
        )
    }
}

impl LeadWizard {
    fn render(self, error: Option<&'static str>) -> LeadOutcome {
        LeadOutcome::Render {
            wizard: self,
            error,
        }
    }

    pub fn apply(mut self, action: LeadAction) -> LeadOutcome {
        match action {
            LeadAction::SelectPackage(slug) => match find_package(&slug) {
                Some(package) => {
                    self.package_interest = package.name.to_string();
                    self.step = LeadStep::Package;
                    self.render(None)
                }
                None => {
                    self.step = LeadStep::Initial;
                    self.render(Some("Please choose a package"))
                }
            },
            LeadAction::SelectLicense(yes) => {
                self.has_license = if yes { "Yes" } else { "No" }.to_string();
                self.step = LeadStep::Details;
                self.render(None)
            }
            LeadAction::Back => {
                self.step = match self.step {
                    LeadStep::Details => LeadStep::Package,
                    _ => LeadStep::Initial,
                };
                self.render(None)
            }
            LeadAction::Submit => {
                if self.name.is_empty() || self.email.is_empty() || self.phone.is_empty() {
                    self.step = LeadStep::Details;
                    return self.render(Some(MSG_REQUIRED_FIELDS));
                }
                if !validation::is_email(&self.email) {
                    self.step = LeadStep::Details;
                    return self.render(Some(MSG_INVALID_EMAIL));
                }
                let submission = NewContactSubmission {
                    name: self.name.clone(),
                    email: self.email.clone(),
                    phone: Some(self.phone.clone()),
                    company: Some(self.company.clone()),
                    message: format!(
                        "Package Interest: {}\nHas License: {}",
                        self.package_interest, self.has_license
                    ),
                    kind: TYPE_STRATEGY_SESSION.to_string(),
                };
                // The success step starts a fresh wizard.
                let wizard = LeadWizard {
                    step: LeadStep::Success,
                    ..Default::default()
                };
                LeadOutcome::Complete { wizard, submission }
            }
            LeadAction::None => self.render(None),
        }
    }
}

// ---- package inquiry ----

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
}

impl PackageInquiry {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company: self.company.trim().to_string(),
        }
    }

    pub fn submission(&self, package_name: &str) -> Result<NewContactSubmission, &'static str> {
        if self.name.is_empty() || self.email.is_empty() || self.phone.is_empty() {
            return Err(MSG_REQUIRED_FIELDS);
        }
        if !validation::is_email(&self.email) {
            return Err(MSG_INVALID_EMAIL);
        }
        Ok(NewContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: Some(self.phone.clone()),
            company: Some(self.company.clone()),
            message: format!("Package Interest: {}", package_name),
            kind: TYPE_PACKAGE_INQUIRY.to_string(),
        })
    }
}
