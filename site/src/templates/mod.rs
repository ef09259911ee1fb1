//! View models handed to the Tera templates, and the template filters.

use inceptum_content::{
    default_section, FaqItem, FeatureView, Package, PageContent, PageContentPatch, SolutionTier,
    PACKAGES,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Sections the landing and about pages render.
pub const KNOWN_SECTIONS: &[&str] = &[
    "hero",
    "features",
    "how-it-works",
    "why-choose-us",
    "packages",
    "solutions",
    "faq",
    "contact",
    "about",
];

const DEFAULT_GRADIENT: (&str, &str) = ("#7c3aed", "#0891b2");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatVm {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonVm {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionVm {
    pub section: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub stats: Vec<StatVm>,
    pub reasons: Vec<ReasonVm>,
}

fn list_from_metadata<T: for<'de> Deserialize<'de>>(metadata: &Value, key: &str) -> Vec<T> {
    metadata
        .get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

impl SectionVm {
    pub fn from_row(row: &PageContent) -> Self {
        let metadata = row.metadata_value();
        Self {
            section: row.section.clone(),
            title: row.title.clone(),
            subtitle: row.subtitle.clone(),
            content: row.content.clone(),
            cta_text: row.cta_text.clone(),
            cta_link: row.cta_link.clone(),
            stats: list_from_metadata(&metadata, "stats"),
            reasons: list_from_metadata(&metadata, "reasons"),
        }
    }

    fn from_defaults(section: &str, patch: PageContentPatch) -> Self {
        let metadata = patch
            .metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or(Value::Null);
        Self {
            section: section.to_string(),
            title: patch.title.unwrap_or_default(),
            subtitle: patch.subtitle,
            content: patch.content,
            cta_text: patch.cta_text,
            cta_link: patch.cta_link,
            stats: list_from_metadata(&metadata, "stats"),
            reasons: list_from_metadata(&metadata, "reasons"),
        }
    }
}

/// Stored sections keyed by name. Known sections without a row fall back to
/// the built-in copy.
pub fn sections_by_name(rows: &[PageContent]) -> HashMap<String, SectionVm> {
    let mut sections: HashMap<String, SectionVm> = rows
        .iter()
        .map(|row| (row.section.clone(), SectionVm::from_row(row)))
        .collect();
    for name in KNOWN_SECTIONS {
        if !sections.contains_key(*name) {
            if let Some(defaults) = default_section(name) {
                sections.insert(name.to_string(), SectionVm::from_defaults(name, defaults));
            }
        }
    }
    sections
}

#[derive(Debug, Clone, Serialize)]
pub struct FaqGroupVm {
    pub category: String,
    pub items: Vec<FaqItem>,
}

/// Group FAQ items by category, keeping the order they arrive in.
pub fn group_faq(items: Vec<FaqItem>) -> Vec<FaqGroupVm> {
    let mut groups: Vec<FaqGroupVm> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item),
            None => groups.push(FaqGroupVm {
                category: item.category.clone(),
                items: vec![item],
            }),
        }
    }
    groups
}

/// schema.org FAQPage document for the landing page's structured data.
pub fn faq_json_ld(groups: &[FaqGroupVm]) -> Value {
    let entities: Vec<Value> = groups
        .iter()
        .flat_map(|g| g.items.iter())
        .map(|item| {
            json!({
                "@type": "Question",
                "name": item.question,
                "acceptedAnswer": {"@type": "Answer", "text": item.answer},
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

/// JSON safe to embed in a `<script>` element.
pub fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SliderPosition {
    pub active: usize,
    pub prev: usize,
    pub next: usize,
}

/// Zero-based slide selection. Defaults to the second slide; prev/next wrap.
pub fn slider_position(requested: Option<usize>, count: usize) -> Option<SliderPosition> {
    if count == 0 {
        return None;
    }
    let active = requested.unwrap_or(1).min(count - 1);
    Some(SliderPosition {
        active,
        prev: if active == 0 { count - 1 } else { active - 1 },
        next: if active + 1 == count { 0 } else { active + 1 },
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideVm {
    pub index: usize,
    pub is_active: bool,
    /// Distance from the active slide, for the stacked-card styling.
    pub distance: usize,
    pub tier: SolutionTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct SliderVm {
    pub position: SliderPosition,
    pub slides: Vec<SlideVm>,
}

pub fn solutions_slider(tiers: Vec<SolutionTier>, requested: Option<usize>) -> Option<SliderVm> {
    let position = slider_position(requested, tiers.len())?;
    let slides = tiers
        .into_iter()
        .enumerate()
        .map(|(index, tier)| SlideVm {
            index,
            is_active: index == position.active,
            distance: index.abs_diff(position.active),
            tier,
        })
        .collect();
    Some(SliderVm { position, slides })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCardVm {
    #[serde(flatten)]
    pub package: Package,
    pub features: &'static [&'static str],
}

pub fn package_cards(view: FeatureView) -> Vec<PackageCardVm> {
    PACKAGES
        .iter()
        .map(|package| PackageCardVm {
            package: *package,
            features: package.features(view),
        })
        .collect()
}

fn tojson_filter(value: &tera::Value, _: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let s = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".into());
    Ok(tera::Value::String(s))
}

/// `{{ from | gradient(to=to) }}` renders a CSS linear gradient. Missing
/// colours fall back to the brand gradient.
fn gradient_filter(value: &tera::Value, args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let from = value.as_str().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_GRADIENT.0);
    let to = args
        .get("to")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_GRADIENT.1);
    Ok(tera::Value::String(format!(
        "linear-gradient(135deg, {} 0%, {} 100%)",
        from, to
    )))
}

pub fn register_filters(tera: &mut tera::Tera) {
    tera.register_filter("tojson", tojson_filter);
    tera.register_filter("json", tojson_filter);
    tera.register_filter("gradient", gradient_filter);
}
