//! The four fixed pricing packages. These never change at runtime, so they
//! live here rather than in the database and are addressed by slug.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub speed: &'static str,
    /// Operational services.
    pub roots: &'static [&'static str],
    /// Digital services.
    pub growth: &'static [&'static str],
    pub highlight: bool,
    pub gradient_from: &'static str,
    pub gradient_to: &'static str,
}

/// Which half of a package's feature list to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureView {
    #[default]
    Roots,
    Growth,
}

impl FeatureView {
    pub fn parse(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("growth") => FeatureView::Growth,
            _ => FeatureView::Roots,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureView::Roots => "roots",
            FeatureView::Growth => "growth",
        }
    }
}

impl Package {
    pub fn features(&self, view: FeatureView) -> &'static [&'static str] {
        match view {
            FeatureView::Roots => self.roots,
            FeatureView::Growth => self.growth,
        }
    }
}

pub static PACKAGES: [Package; 4] = [
    Package {
        slug: "foundation",
        name: "The Foundation",
        tagline: "Legal & Digital Presence in <30 Days",
        description: "Founders needing a legal & digital presence in less than 30 days",
        price: "AED 12,500",
        speed: "21-30 Days",
        roots: &[
            "Trade License Setup",
            "Business Registration",
            "Basic Banking Setup",
        ],
        growth: &[
            "Professional Website",
            "Brand Copy & Messaging",
            "Social Media Profiles",
        ],
        highlight: false,
        gradient_from: "#a855f7",
        gradient_to: "#ec4899",
    },
    Package {
        slug: "scaler",
        name: "The Scaler",
        tagline: "Hire & Dominate Local Search",
        description: "Companies ready to hire and dominate local search",
        price: "AED 28,000",
        speed: "30-45 Days",
        roots: &[
            "Everything in Foundation",
            "PRO License (up to 5 employees)",
            "HR & Payroll Setup",
        ],
        growth: &[
            "SEO Optimization",
            "Meta Ad Spend Strategy",
            "Monthly Analytics & Reporting",
        ],
        highlight: true,
        gradient_from: "#ec4899",
        gradient_to: "#06b6d4",
    },
    Package {
        slug: "fortress",
        name: "The Fortress",
        tagline: "Retention & Tax Efficiency",
        description: "Brands focused on retention and tax efficiency",
        price: "AED 45,000",
        speed: "45-60 Days",
        roots: &[
            "Everything in Scaler",
            "Accounting & Tax Setup",
            "Legal Compliance Audit",
        ],
        growth: &[
            "Email Marketing & CRM",
            "Content Calendar & Strategy",
            "Quarterly Business Reviews",
        ],
        highlight: false,
        gradient_from: "#06b6d4",
        gradient_to: "#3b82f6",
    },
    Package {
        slug: "visionary",
        name: "The Visionary",
        tagline: "Long-Term Strategic Partnership",
        description: "Firms seeking a long-term strategic partner",
        price: "Custom",
        speed: "Ongoing",
        roots: &[
            "Everything in Fortress",
            "Fractional COO Services",
            "Executive Office Support",
        ],
        growth: &[
            "Fractional CMO Strategy",
            "Growth Hacking & Innovation",
            "Dedicated Account Manager",
        ],
        highlight: false,
        gradient_from: "#3b82f6",
        gradient_to: "#a855f7",
    },
];

pub fn find_package(slug: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packages_are_addressable_by_slug() {
        assert_eq!(find_package("scaler").map(|p| p.name), Some("The Scaler"));
        assert!(find_package("platinum").is_none());
    }

    #[test]
    fn exactly_one_package_is_highlighted() {
        assert_eq!(PACKAGES.iter().filter(|p| p.highlight).count(), 1);
    }

    #[test]
    fn view_defaults_to_roots() {
        assert_eq!(FeatureView::parse(None), FeatureView::Roots);
        assert_eq!(FeatureView::parse(Some("bogus")), FeatureView::Roots);
        assert_eq!(FeatureView::parse(Some("Growth")), FeatureView::Growth);

        let visionary = find_package("visionary").unwrap();
        assert_eq!(
            visionary.features(FeatureView::Growth)[0],
            "Fractional CMO Strategy"
        );
    }
}
