//! Default marketing catalogue written into an empty database.

use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::{
    NewFaqItem, NewProcessStep, NewService, NewSolutionTier, PageContentPatch,
};
use crate::store::{
    insert_faq_item, insert_page_content, insert_process_step, insert_service,
    insert_solution_tier, ContentStore,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub skipped: bool,
    pub page_sections: usize,
    pub services: usize,
    pub solution_tiers: usize,
    pub process_steps: usize,
    pub faq_items: usize,
}

struct Section {
    section: &'static str,
    title: &'static str,
    subtitle: Option<&'static str>,
    content: Option<&'static str>,
    cta_text: Option<&'static str>,
    cta_link: Option<&'static str>,
}

const SECTIONS: &[Section] = &[
    Section {
        section: "hero",
        title: "Launch Your Tech Startup in the UAE",
        subtitle: Some("For Tech Startups"),
        content: Some("Everything you need under one roof. From UAE business licensing and compliance to digital marketing solutions, we handle it all so you can focus on building."),
        cta_text: Some("Explore Solutions"),
        cta_link: Some("#solutions"),
    },
    Section {
        section: "features",
        title: "Everything You Need",
        subtitle: Some("Comprehensive services to launch and grow your tech startup"),
        content: None,
        cta_text: None,
        cta_link: None,
    },
    Section {
        section: "how-it-works",
        title: "How It Works",
        subtitle: Some("Simple process from consultation to launch"),
        content: None,
        cta_text: None,
        cta_link: None,
    },
    Section {
        section: "why-choose-us",
        title: "Why Choose Inceptum",
        subtitle: None,
        content: None,
        cta_text: None,
        cta_link: None,
    },
    Section {
        section: "packages",
        title: "Choose Your Growth Path",
        subtitle: Some("Every package includes both Roots (operational) and Growth (digital) services"),
        content: Some("All packages include 24/7 support, quarterly strategy sessions, and access to our founder community."),
        cta_text: Some("Get Started"),
        cta_link: None,
    },
    Section {
        section: "solutions",
        title: "Choose Your Path",
        subtitle: Some("Flexible pricing packages tailored to your startup stage"),
        content: None,
        cta_text: Some("Get Started"),
        cta_link: None,
    },
    Section {
        section: "faq",
        title: "Frequently Asked Questions",
        subtitle: Some("Everything you need to know about our services"),
        content: None,
        cta_text: None,
        cta_link: None,
    },
    Section {
        section: "contact",
        title: "Ready to Launch?",
        subtitle: Some("Book a strategy session with our team"),
        content: None,
        cta_text: Some("Book Session"),
        cta_link: Some("#contact"),
    },
    Section {
        section: "about",
        title: "The Architecture of Growth",
        subtitle: Some("How Inceptum bridges the gap between bureaucracy and obscurity"),
        content: Some("At Inceptum, we believe a business is a living organism. To survive, it needs two things working in perfect harmony: Roots and Growth."),
        cta_text: Some("Book a Strategy Session"),
        cta_link: Some("/booking"),
    },
];

fn section_metadata(section: &str) -> Option<String> {
    let value = match section {
        "hero" => json!({
            "stats": [
                {"value": "500+", "label": "Companies Launched"},
                {"value": "98%", "label": "Success Rate"},
                {"value": "24/7", "label": "Support"}
            ]
        }),
        "why-choose-us" => json!({
            "reasons": [
                {"title": "UAE Compliance Experts", "description": "Deep knowledge of local regulations and best practices"},
                {"title": "All-in-One Solution", "description": "No need to juggle multiple vendors"},
                {"title": "Tech-Focused Approach", "description": "We understand startup challenges"},
                {"title": "Transparent Pricing", "description": "No hidden fees or surprise costs"}
            ]
        }),
        _ => return None,
    };
    Some(value.to_string())
}

impl Section {
    fn patch(&self) -> PageContentPatch {
        PageContentPatch {
            title: Some(self.title.to_string()),
            subtitle: self.subtitle.map(str::to_string),
            content: self.content.map(str::to_string),
            cta_text: self.cta_text.map(str::to_string),
            cta_link: self.cta_link.map(str::to_string),
            metadata: section_metadata(self.section),
        }
    }
}

/// The copy the seeder writes for `section`. The site renders it while the
/// section has no row of its own.
pub fn default_section(section: &str) -> Option<PageContentPatch> {
    SECTIONS
        .iter()
        .find(|s| s.section == section)
        .map(Section::patch)
}

// (name, description, icon, from, to)
const SERVICES: &[(&str, &str, &str, &str, &str)] = &[
    (
        "UAE Business Licensing",
        "Complete setup for your business license with expert guidance",
        "building",
        "#a855f7",
        "#ec4899",
    ),
    (
        "Compliance & Legal",
        "Stay compliant with UAE regulations and international standards",
        "shield",
        "#ec4899",
        "#ef4444",
    ),
    (
        "Corporate Setup",
        "Bank accounts, tax registration, and corporate essentials",
        "zap",
        "#ef4444",
        "#f97316",
    ),
    (
        "Domain & Web Services",
        "Professional domain registration and web hosting",
        "globe",
        "#f97316",
        "#06b6d4",
    ),
    (
        "Email & Communications",
        "Business email setup and professional communication tools",
        "mail",
        "#06b6d4",
        "#3b82f6",
    ),
    (
        "Digital Marketing Support",
        "Social media setup, SEO, and marketing strategy",
        "megaphone",
        "#3b82f6",
        "#a855f7",
    ),
];

struct Tier {
    tier_id: &'static str,
    badge: &'static str,
    name: &'static str,
    description: &'static str,
    price: &'static str,
    gradient: (&'static str, &'static str),
    features: &'static [&'static str],
}

const TIERS: &[Tier] = &[
    Tier {
        tier_id: "essentials",
        badge: "Low Budget Startup",
        name: "Essentials Package",
        description: "Perfect for bootstrapped founders",
        price: "AED 12,500",
        gradient: ("#a855f7", "#ec4899"),
        features: &[
            "Business License Setup",
            "Basic Compliance",
            "Domain Registration",
            "Email Setup",
            "Social Media Profiles",
        ],
    },
    Tier {
        tier_id: "scale",
        badge: "Growth Stage",
        name: "Scale Package",
        description: "For growing tech companies",
        price: "AED 28,000",
        gradient: ("#ec4899", "#06b6d4"),
        features: &[
            "Everything in Essentials",
            "Advanced Compliance",
            "Website Development",
            "SEO Optimization",
            "Social Media Management",
            "Monthly Analytics",
        ],
    },
    Tier {
        tier_id: "complete",
        badge: "Enterprise",
        name: "Complete Package",
        description: "Full-service solution",
        price: "Custom Pricing",
        gradient: ("#06b6d4", "#3b82f6"),
        features: &[
            "Everything in Scale",
            "Custom Development",
            "Dedicated Account Manager",
            "24/7 Support",
            "Marketing Strategy",
            "Brand Development",
        ],
    },
];

// (title, description, duration)
const STEPS: &[(&str, &str, &str)] = &[
    ("Consultation", "Discuss your startup needs and goals", "1-2 days"),
    ("Documentation", "Prepare all required documents and paperwork", "3-5 days"),
    ("License Application", "Submit application to UAE authorities", "5-10 days"),
    ("Corporate Setup", "Bank account and tax registration", "3-7 days"),
    ("Digital Services", "Website, email, and social media setup", "5-10 days"),
    ("Launch & Support", "Go live with ongoing support", "Ongoing"),
];

// (category, question, answer)
const FAQ: &[(&str, &str, &str)] = &[
    (
        "Licensing",
        "How long does it take to get a business license?",
        "Typically 15-30 days depending on the type of license and completeness of documentation.",
    ),
    (
        "Licensing",
        "What types of licenses are available for tech startups?",
        "We offer freelance, professional, commercial, and industrial licenses tailored to your business model.",
    ),
    (
        "Compliance",
        "What compliance requirements must I follow?",
        "UAE requires annual audits, tax registration, and adherence to labor laws. We guide you through all requirements.",
    ),
    (
        "Compliance",
        "Do I need a local sponsor?",
        "Depends on your visa status. We can arrange sponsorship if needed.",
    ),
    (
        "Costs",
        "What are the hidden costs?",
        "No hidden costs. We provide transparent pricing with all fees upfront.",
    ),
    (
        "Costs",
        "Can I upgrade my package later?",
        "Yes, you can upgrade anytime. We'll credit your current package towards the upgrade.",
    ),
    (
        "Digital Services",
        "Do you provide website development?",
        "Yes, we offer custom website development, e-commerce solutions, and SEO optimization.",
    ),
    (
        "Digital Services",
        "What social media platforms do you manage?",
        "We manage LinkedIn, Instagram, Facebook, Twitter, and TikTok based on your target audience.",
    ),
    (
        "Support",
        "Is support available 24/7?",
        "Yes, our support team is available 24/7 for urgent matters and during business hours for general inquiries.",
    ),
    (
        "Support",
        "Can I change my package after signing up?",
        "Absolutely. You can upgrade, downgrade, or modify your services anytime.",
    ),
];

const STEP_GRADIENT: (&str, &str) = ("#7c3aed", "#0891b2");

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ContentStore {
    /// Write the default catalogue. Without `force` this is a no-op unless
    /// every content table is empty; with `force` the content tables are
    /// cleared first. Users and submissions are never touched.
    ///
    /// The clear and every insert share one transaction, so a failed seed
    /// leaves the previous content in place.
    pub fn seed_defaults(&self, force: bool) -> StoreResult<SeedReport> {
        if !force && !self.counts()?.content_is_empty() {
            debug!("Content tables already populated; skipping seed");
            return Ok(SeedReport {
                skipped: true,
                ..Default::default()
            });
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        if force {
            clear_content(&tx)?;
        }
        let report = write_catalogue(&tx)?;
        tx.commit()?;

        info!(
            "Seeded {} sections, {} services, {} tiers, {} steps, {} FAQ items",
            report.page_sections,
            report.services,
            report.solution_tiers,
            report.process_steps,
            report.faq_items
        );
        Ok(report)
    }
}

fn clear_content(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "DELETE FROM page_content;
         DELETE FROM services;
         DELETE FROM solution_tiers;
         DELETE FROM process_steps;
         DELETE FROM faq_items;",
    )?;
    Ok(())
}

fn write_catalogue(conn: &Connection) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    for s in SECTIONS {
        insert_page_content(conn, s.section, &s.patch(), None)?;
        report.page_sections += 1;
    }

    for (order, (name, description, icon, from, to)) in SERVICES.iter().enumerate() {
        let service = NewService {
            name: name.to_string(),
            description: description.to_string(),
            icon: Some(icon.to_string()),
            gradient_from: Some(from.to_string()),
            gradient_to: Some(to.to_string()),
            display_order: order as i64 + 1,
            is_active: true,
        };
        insert_service(conn, &service, None)?;
        report.services += 1;
    }

    for (order, tier) in TIERS.iter().enumerate() {
        let tier = NewSolutionTier {
            tier_id: tier.tier_id.to_string(),
            badge: tier.badge.to_string(),
            name: tier.name.to_string(),
            description: tier.description.to_string(),
            price: tier.price.to_string(),
            cta_text: "Get Started".to_string(),
            gradient_from: tier.gradient.0.to_string(),
            gradient_to: tier.gradient.1.to_string(),
            features: owned(tier.features),
            display_order: order as i64 + 1,
            is_active: true,
        };
        insert_solution_tier(conn, &tier, None)?;
        report.solution_tiers += 1;
    }

    for (index, (title, description, duration)) in STEPS.iter().enumerate() {
        let step = NewProcessStep {
            step_number: index as i64 + 1,
            title: title.to_string(),
            description: description.to_string(),
            duration: duration.to_string(),
            details: Vec::new(),
            gradient_from: STEP_GRADIENT.0.to_string(),
            gradient_to: STEP_GRADIENT.1.to_string(),
            is_active: true,
        };
        insert_process_step(conn, &step, None)?;
        report.process_steps += 1;
    }

    let mut previous_category = "";
    let mut order = 0;
    for (category, question, answer) in FAQ {
        if *category != previous_category {
            previous_category = *category;
            order = 0;
        }
        order += 1;
        let item = NewFaqItem {
            category: category.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            display_order: order,
            is_active: true,
        };
        insert_faq_item(conn, &item, None)?;
        report.faq_items += 1;
    }

    Ok(report)
}
