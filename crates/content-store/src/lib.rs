//! Inceptum content store
//!
//! SQLite-backed tables behind the marketing site: editable page sections,
//! services, solution tiers, process steps, FAQ items, testimonials, the
//! users who administer them and the contact submissions visitors leave.
//! The fixed pricing packages are a compile-time catalogue in [`packages`].

pub mod error;
pub mod models;
pub mod packages;
pub mod schema;
pub mod seed;
pub mod store;
pub mod validation;

pub use error::{StoreError, StoreResult};
pub use models::{
    ContactSubmission, FaqItem, FaqItemPatch, NewContactSubmission, NewFaqItem, NewProcessStep,
    NewService, NewSolutionTier, NewTestimonial, PageContent, PageContentPatch, ProcessStep,
    ProcessStepPatch, Role, Service, ServicePatch, SolutionTier, SolutionTierPatch,
    SubmissionStatus, SubmissionStatusUpdate, TableCounts, Testimonial, UpsertUser, User,
    Visibility,
};
pub use packages::{find_package, FeatureView, Package, PACKAGES};
pub use seed::{default_section, SeedReport};
pub use store::ContentStore;
